//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.mixer-build/config.toml` - User-wide defaults
//! - Project: `<plugin>/.mixer-build/config.toml` - Plugin-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::backend::Backend;
use crate::core::surface::FlagStyle;
use crate::resolver::{LibraryLayout, ResolveError, ResolverOptions};

/// Name of the per-user and per-plugin configuration directory.
pub const CONFIG_DIR_NAME: &str = ".mixer-build";

/// Tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolver settings
    pub resolver: ResolverConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Resolver-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Third-party root, relative to the plugin root unless absolute
    pub third_party: Option<PathBuf>,

    /// Library layout (platform, architecture, address-model)
    pub layout: Option<String>,

    /// Engine version the plugin is built against (e.g. "4.18.3")
    pub engine_version: Option<String>,

    /// Explicit backend (native-v1, native-v2, null, engine)
    pub backend: Option<String>,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (text, json, flags)
    pub format: Option<String>,

    /// Default flag dialect (msvc, gnu)
    pub flag_style: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.resolver.third_party.is_some() {
            self.resolver.third_party = other.resolver.third_party;
        }
        if other.resolver.layout.is_some() {
            self.resolver.layout = other.resolver.layout;
        }
        if other.resolver.engine_version.is_some() {
            self.resolver.engine_version = other.resolver.engine_version;
        }
        if other.resolver.backend.is_some() {
            self.resolver.backend = other.resolver.backend;
        }

        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.output.flag_style.is_some() {
            self.output.flag_style = other.output.flag_style;
        }
    }

    /// Parse the configured backend override.
    pub fn backend(&self) -> Result<Option<Backend>, ResolveError> {
        self.resolver
            .backend
            .as_ref()
            .map(|s| {
                s.parse().map_err(|_| ResolveError::InvalidBackend {
                    name: s.to_string(),
                })
            })
            .transpose()
    }

    /// Parse the configured library layout.
    pub fn layout(&self) -> Result<LibraryLayout> {
        match self.resolver.layout {
            Some(ref s) => s.parse().map_err(|e: String| anyhow::anyhow!(e)),
            None => Ok(LibraryLayout::default()),
        }
    }

    /// Parse the configured engine version.
    ///
    /// Accepts `major` and `major.minor` as well as full semver strings;
    /// missing components are zero.
    pub fn engine_version(&self) -> Result<Option<Version>> {
        let Some(ref raw) = self.resolver.engine_version else {
            return Ok(None);
        };

        let mut normalized = raw.trim().to_string();
        for _ in normalized.matches('.').count()..2 {
            normalized.push_str(".0");
        }

        Version::parse(&normalized)
            .map(Some)
            .with_context(|| format!("invalid engine version `{}`", raw))
    }

    /// Parse the configured flag dialect.
    pub fn flag_style(&self) -> Result<FlagStyle> {
        match self.output.flag_style {
            Some(ref s) => s.parse().map_err(|e: String| anyhow::anyhow!(e)),
            None => Ok(FlagStyle::default()),
        }
    }

    /// Build resolver options for a plugin rooted at `plugin_root`.
    pub fn resolver_options(&self, plugin_root: &Path) -> Result<ResolverOptions> {
        let mut options = ResolverOptions::default();

        let third_party = self
            .resolver
            .third_party
            .clone()
            .unwrap_or_else(|| options.third_party.clone());
        options.third_party = if third_party.is_absolute() {
            third_party
        } else {
            plugin_root.join(third_party)
        };

        options.layout = self.layout()?;
        if let Some(version) = self.engine_version()? {
            options.engine_version = version;
        }

        Ok(options)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.mixer-build/config.toml)
/// 2. Global config (~/.mixer-build/config.toml)
/// 3. Defaults
///
/// A broken global config is logged and skipped. A broken project config is
/// an error, since its settings decide what the plugin is built with.
pub fn load_config(global_path: &Path, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load(project_path)?;
        config.merge(project);
    }

    Ok(config)
}

/// Get the global config directory (~/.mixer-build).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::DefinitionScope;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.resolver.backend.is_none());
        assert_eq!(config.backend().unwrap(), None);
        assert_eq!(config.layout().unwrap(), LibraryLayout::Platform);
        assert_eq!(config.flag_style().unwrap(), FlagStyle::Msvc);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[resolver]
third_party = "Vendor"
layout = "architecture"
engine_version = "4.18"
backend = "null"

[output]
format = "json"
flag_style = "gnu"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.backend().unwrap(), Some(Backend::NullBackend));
        assert_eq!(config.layout().unwrap(), LibraryLayout::Architecture);
        assert_eq!(
            config.engine_version().unwrap(),
            Some(Version::new(4, 18, 0))
        );
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.flag_style().unwrap(), FlagStyle::Gnu);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.resolver.backend = Some("native-v1".to_string());
        base.resolver.layout = Some("address-model".to_string());

        let mut override_cfg = Config::default();
        override_cfg.resolver.backend = Some("null".to_string());

        base.merge(override_cfg);

        assert_eq!(base.resolver.backend, Some("null".to_string()));
        assert_eq!(base.resolver.layout, Some("address-model".to_string()));
    }

    #[test]
    fn test_invalid_backend() {
        let mut config = Config::default();
        config.resolver.backend = Some("cmake".to_string());

        let err = config.backend().unwrap_err();
        assert!(matches!(err, ResolveError::InvalidBackend { ref name } if name == "cmake"));
    }

    #[test]
    fn test_engine_version_padding() {
        let mut config = Config::default();

        config.resolver.engine_version = Some("4".to_string());
        assert_eq!(config.engine_version().unwrap(), Some(Version::new(4, 0, 0)));

        config.resolver.engine_version = Some("4.18".to_string());
        assert_eq!(config.engine_version().unwrap(), Some(Version::new(4, 18, 0)));

        config.resolver.engine_version = Some("4.19.2".to_string());
        assert_eq!(config.engine_version().unwrap(), Some(Version::new(4, 19, 2)));

        let options = config.resolver_options(Path::new("/plugin")).unwrap();
        assert_eq!(options.definition_scope(), DefinitionScope::Private);
    }

    #[test]
    fn test_invalid_engine_version() {
        let mut config = Config::default();
        config.resolver.engine_version = Some("four".to_string());
        assert!(config.engine_version().is_err());
    }

    #[test]
    fn test_resolver_options_relative_third_party() {
        let mut config = Config::default();
        config.resolver.third_party = Some(PathBuf::from("Vendor"));
        config.resolver.engine_version = Some("4.17.2".to_string());

        let options = config.resolver_options(Path::new("/plugin")).unwrap();
        assert_eq!(options.third_party, PathBuf::from("/plugin/Vendor"));
        assert_eq!(options.engine_version, Version::new(4, 17, 2));
    }

    #[test]
    fn test_resolver_options_default_third_party() {
        let options = Config::default()
            .resolver_options(Path::new("/plugin"))
            .unwrap();
        assert_eq!(options.third_party, PathBuf::from("/plugin/ThirdParty"));
        assert_eq!(options.layout, LibraryLayout::Platform);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[resolver]
backend = "native-v1"
layout = "architecture"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[resolver]
backend = "null"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path).unwrap();

        assert_eq!(config.resolver.backend, Some("null".to_string()));
        assert_eq!(config.resolver.layout, Some("architecture".to_string()));
    }

    #[test]
    fn test_broken_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[resolver\nbackend = ").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.resolver.backend.is_none());
    }

    #[test]
    fn test_broken_project_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");
        std::fs::write(&global_path, "[resolver\nlayout = ").unwrap();
        std::fs::write(&project_path, "[resolver]\nbackend = \"null\"\nlayout = ").unwrap();

        let err = load_config(&global_path, &project_path).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config file"));

        std::fs::write(&project_path, "[resolver]\nbackend = \"null\"\n").unwrap();
        let config = load_config(&global_path, &project_path).unwrap();
        assert_eq!(config.resolver.backend, Some("null".to_string()));
    }
}
