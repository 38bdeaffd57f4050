//! Global context for resolver operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{global_config_dir, load_config, Config, CONFIG_DIR_NAME};

/// Extension of the engine plugin descriptor.
pub const PLUGIN_DESCRIPTOR_EXT: &str = "uplugin";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global data (~/.mixer-build/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = global_config_dir().unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));

        GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        }
    }

    /// Override the global home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global home directory (~/.mixer-build/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the plugin-local configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.plugin_root().join(CONFIG_DIR_NAME).join("config.toml")
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find the plugin root: the nearest ancestor of cwd holding a
    /// `*.uplugin` descriptor, or cwd itself.
    pub fn plugin_root(&self) -> PathBuf {
        let mut current = self.cwd.clone();
        loop {
            if has_plugin_descriptor(&current) {
                return current;
            }
            if !current.pop() {
                return self.cwd.clone();
            }
        }
    }

    /// Load merged global and plugin configuration.
    pub fn load_config(&self) -> Result<Config> {
        load_config(&self.config_path(), &self.project_config_path())
    }
}

fn has_plugin_descriptor(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };

    entries.flatten().any(|entry| {
        entry.path().extension().and_then(|e| e.to_str()) == Some(PLUGIN_DESCRIPTOR_EXT)
            && entry.path().is_file()
    })
}
