//! Target platforms understood by the resolver.
//!
//! The set is closed: anything the engine reports that is not one of the
//! platforms with a native interactivity SDK lands in [`Platform::Other`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resolver::errors::ResolveError;

/// A target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    Win32,
    Win64,
    XboxOne,
    #[serde(rename = "UWP32")]
    Uwp32,
    #[serde(rename = "UWP64")]
    Uwp64,
    /// Any platform without a native SDK.
    Other,
}

/// CPU architecture of a platform's third-party binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X86,
    X64,
}

impl Architecture {
    /// Directory fragment used by Visual Studio style binary trees.
    pub fn vs_fragment(&self) -> &'static str {
        match self {
            Architecture::X86 => "Win32",
            Architecture::X64 => "x64",
        }
    }

    /// Directory fragment used by Boost.Build style binary trees.
    pub fn address_model(&self) -> &'static str {
        match self {
            Architecture::X86 => "address-model-32",
            Architecture::X64 => "address-model-64",
        }
    }
}

impl Platform {
    /// Every platform, in declaration order.
    pub const ALL: [Platform; 6] = [
        Platform::Win32,
        Platform::Win64,
        Platform::XboxOne,
        Platform::Uwp32,
        Platform::Uwp64,
        Platform::Other,
    ];

    /// Engine spelling of the platform name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Win32 => "Win32",
            Platform::Win64 => "Win64",
            Platform::XboxOne => "XboxOne",
            Platform::Uwp32 => "UWP32",
            Platform::Uwp64 => "UWP64",
            Platform::Other => "Other",
        }
    }

    /// Desktop Windows (Win32 or Win64).
    pub fn is_windows_desktop(&self) -> bool {
        matches!(self, Platform::Win32 | Platform::Win64)
    }

    /// Universal Windows Platform (UWP32 or UWP64).
    pub fn is_uwp(&self) -> bool {
        matches!(self, Platform::Uwp32 | Platform::Uwp64)
    }

    /// Whether a native interactivity SDK is shipped for this platform.
    pub fn has_native_sdk(&self) -> bool {
        !matches!(self, Platform::Other)
    }

    /// Whether an in-process browser login is available.
    pub fn supports_oauth(&self) -> bool {
        self.is_windows_desktop()
    }

    /// Architecture of the platform's third-party binaries.
    pub fn architecture(&self) -> Option<Architecture> {
        match self {
            Platform::Win32 | Platform::Uwp32 => Some(Architecture::X86),
            Platform::Win64 | Platform::Uwp64 | Platform::XboxOne => Some(Architecture::X64),
            Platform::Other => None,
        }
    }

    /// Parse a platform name, degrading unknown names to [`Platform::Other`].
    pub fn from_name(name: &str) -> Platform {
        match name.parse() {
            Ok(platform) => platform,
            Err(_) => {
                tracing::debug!("unknown platform `{}`, treating as Other", name);
                Platform::Other
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "win32" | "windows32" => Ok(Platform::Win32),
            "win64" | "windows" | "windows64" => Ok(Platform::Win64),
            "xboxone" | "xbox" | "xb1" | "durango" => Ok(Platform::XboxOne),
            "uwp32" | "uwpx86" => Ok(Platform::Uwp32),
            "uwp64" | "uwp" | "uwpx64" => Ok(Platform::Uwp64),
            "other" => Ok(Platform::Other),
            _ => Err(ResolveError::UnsupportedPlatform {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine_names() {
        assert_eq!("Win64".parse::<Platform>().unwrap(), Platform::Win64);
        assert_eq!("UWP32".parse::<Platform>().unwrap(), Platform::Uwp32);
        assert_eq!("XboxOne".parse::<Platform>().unwrap(), Platform::XboxOne);
        assert_eq!("uwp-x64".parse::<Platform>().unwrap(), Platform::Uwp64);
        assert_eq!("xb1".parse::<Platform>().unwrap(), Platform::XboxOne);
    }

    #[test]
    fn test_parse_unknown_is_error() {
        let err = "Linux".parse::<Platform>().unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedPlatform { ref name } if name == "Linux"));
    }

    #[test]
    fn test_from_name_degrades_to_other() {
        assert_eq!(Platform::from_name("PS4"), Platform::Other);
        assert_eq!(Platform::from_name("Mac"), Platform::Other);
        assert_eq!(Platform::from_name("Win32"), Platform::Win32);
    }

    #[test]
    fn test_display_round_trips() {
        for platform in Platform::ALL {
            assert_eq!(platform.to_string().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_architecture() {
        assert_eq!(Platform::Win32.architecture(), Some(Architecture::X86));
        assert_eq!(Platform::XboxOne.architecture(), Some(Architecture::X64));
        assert_eq!(Platform::Other.architecture(), None);
        assert_eq!(Architecture::X64.vs_fragment(), "x64");
        assert_eq!(Architecture::X86.address_model(), "address-model-32");
    }

    #[test]
    fn test_oauth_only_on_desktop() {
        let oauth: Vec<_> = Platform::ALL
            .iter()
            .filter(|p| p.supports_oauth())
            .collect();
        assert_eq!(oauth, vec![&Platform::Win32, &Platform::Win64]);
    }
}
