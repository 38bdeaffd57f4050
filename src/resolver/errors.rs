//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::platform::Platform;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error during platform/backend resolution.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("unsupported platform `{name}`")]
    #[diagnostic(
        code(mixer_build::resolve::unsupported_platform),
        help("Unknown platforms build with the null backend unless `--strict` is given")
    )]
    UnsupportedPlatform { name: String },

    #[error("invalid backend `{name}`")]
    #[diagnostic(code(mixer_build::resolve::invalid_backend))]
    InvalidBackend { name: String },

    #[error("cycle detected in module graph at `{module}`")]
    #[diagnostic(code(mixer_build::modules::cycle))]
    ModuleCycle { module: String },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UnsupportedPlatform { name } => {
                let known: Vec<_> = Platform::ALL
                    .iter()
                    .filter(|p| p.has_native_sdk())
                    .map(|p| p.as_str())
                    .collect();

                Diagnostic::error(format!("platform `{}` has no interactivity SDK", name))
                    .with_context(format!("known platforms: {}", known.join(", ")))
                    .with_suggestion("Drop `--strict` to build with the null backend".to_string())
                    .with_suggestion(suggestions::UNKNOWN_PLATFORM)
            }

            ResolveError::InvalidBackend { name } => {
                Diagnostic::error(format!("unknown backend `{}`", name))
                    .with_context("valid backends: native-v1, native-v2, null, engine")
                    .with_suggestion("Fix `resolver.backend` in .mixer-build/config.toml".to_string())
            }

            ResolveError::ModuleCycle { module } => {
                Diagnostic::error("cycle detected in module graph")
                    .with_context(format!("`{}` depends on itself", module))
                    .with_suggestion(
                        "Break the cycle by removing a private dependency".to_string(),
                    )
            }
        }
    }
}
