//! Platform resolution operations.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::core::backend::Backend;
use crate::core::platform::Platform;
use crate::resolver::{Resolution, ResolveError, Resolver};
use crate::util::config::Config;

/// Options for resolving a single platform.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Platform name as the engine spells it
    pub platform: String,

    /// Backend requested on the command line; wins over config
    pub backend: Option<Backend>,

    /// Fail on unknown platforms instead of using `Other`
    pub strict: bool,
}

/// Parse a platform name according to the strictness setting.
pub fn parse_platform(name: &str, strict: bool) -> Result<Platform, ResolveError> {
    if strict {
        name.parse()
    } else {
        Ok(Platform::from_name(name))
    }
}

/// Build a resolver from configuration.
pub fn resolver_from_config(config: &Config, plugin_root: &Path) -> Result<Resolver> {
    Ok(Resolver::new(config.resolver_options(plugin_root)?))
}

/// Backend requested by command line or configuration.
pub fn requested_backend(config: &Config, cli: Option<Backend>) -> Result<Option<Backend>> {
    match cli {
        Some(backend) => Ok(Some(backend)),
        None => Ok(config.backend()?),
    }
}

/// Resolve one platform.
pub fn resolve_platform(
    config: &Config,
    plugin_root: &Path,
    opts: &ResolveOptions,
) -> Result<Resolution> {
    let platform = parse_platform(&opts.platform, opts.strict)?;
    let resolver = resolver_from_config(config, plugin_root)?;
    let backend = requested_backend(config, opts.backend)?;

    tracing::debug!(
        "resolving {} (requested backend: {})",
        platform,
        backend.map(|b| b.as_str()).unwrap_or("default")
    );

    Ok(resolver.resolve(platform, backend))
}

/// One row of the platform matrix.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub platform: Platform,
    pub backend: Backend,
    pub oauth: bool,
    pub libraries: usize,
    pub module_dependencies: Vec<String>,
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub resolution: Resolution,
}

impl MatrixRow {
    fn new(resolution: Resolution) -> Self {
        MatrixRow {
            platform: resolution.platform,
            backend: resolution.backend,
            oauth: resolution.oauth(),
            libraries: resolution.link.libs.len(),
            module_dependencies: resolution
                .module_dependencies
                .iter()
                .map(|m| m.name.clone())
                .collect(),
            fingerprint: resolution.fingerprint(),
            warnings: resolution.warnings.clone(),
            resolution,
        }
    }
}

/// Resolve every known platform.
pub fn resolve_matrix(
    config: &Config,
    plugin_root: &Path,
    backend: Option<Backend>,
) -> Result<Vec<MatrixRow>> {
    let resolver = resolver_from_config(config, plugin_root)?;
    let backend = requested_backend(config, backend)?;

    Ok(Platform::ALL
        .iter()
        .map(|&platform| MatrixRow::new(resolver.resolve(platform, backend)))
        .collect())
}
