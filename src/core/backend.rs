//! Interactivity backends.
//!
//! Exactly one backend is compiled into the runtime module. The build rules
//! expose the choice as four `MIXER_BACKEND_*` definitions, one of them set.

use serde::{Deserialize, Serialize};

/// The interactivity backend compiled into the runtime module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// interactive-cpp static library
    #[serde(rename = "native-v1")]
    NativeClientV1,
    /// interactive-cpp-v2 sources (no shipped library manifest)
    #[serde(rename = "native-v2")]
    NativeClientV2,
    /// No interactivity; all calls are no-ops
    #[serde(rename = "null")]
    NullBackend,
    /// Engine HTTP and WebSockets modules
    #[serde(rename = "engine")]
    EngineBuiltin,
}

impl Backend {
    /// Every backend, in the order their definitions are emitted.
    pub const ALL: [Backend; 4] = [
        Backend::NativeClientV1,
        Backend::NativeClientV2,
        Backend::NullBackend,
        Backend::EngineBuiltin,
    ];

    /// Get the backend name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::NativeClientV1 => "native-v1",
            Backend::NativeClientV2 => "native-v2",
            Backend::NullBackend => "null",
            Backend::EngineBuiltin => "engine",
        }
    }

    /// Preprocessor definition that is `1` when this backend is selected.
    pub fn define_name(&self) -> &'static str {
        match self {
            Backend::NativeClientV1 => "MIXER_BACKEND_INTERACTIVE_CPP",
            Backend::NativeClientV2 => "MIXER_BACKEND_INTERACTIVE_CPP_2",
            Backend::NullBackend => "MIXER_BACKEND_NULL",
            Backend::EngineBuiltin => "MIXER_BACKEND_UE",
        }
    }

    /// Whether the backend links a native client SDK.
    pub fn is_native(&self) -> bool {
        matches!(self, Backend::NativeClientV1 | Backend::NativeClientV2)
    }

    /// Third-party header directory under `ThirdParty/Include`, if any.
    pub fn include_subdir(&self) -> Option<&'static str> {
        match self {
            Backend::NativeClientV1 => Some("interactive-cpp"),
            Backend::NativeClientV2 => Some("interactive-cpp-v2"),
            Backend::NullBackend | Backend::EngineBuiltin => None,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = BackendParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native-v1" | "native" | "v1" | "interactive-cpp" => Ok(Backend::NativeClientV1),
            "native-v2" | "v2" | "interactive-cpp-v2" => Ok(Backend::NativeClientV2),
            "null" | "none" => Ok(Backend::NullBackend),
            "engine" | "ue" | "builtin" => Ok(Backend::EngineBuiltin),
            _ => Err(BackendParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid backend name.
#[derive(Debug, Clone)]
pub struct BackendParseError(pub String);

impl std::fmt::Display for BackendParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid backend '{}', valid values: native-v1, native-v2, null, engine",
            self.0
        )
    }
}

impl std::error::Error for BackendParseError {}
