//! Command implementations

pub mod check;
pub mod completions;
pub mod flags;
pub mod matrix;
pub mod modules;
pub mod resolve;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::PlatformArgs;
use mixer_build::ops::resolve::{resolve_platform, ResolveOptions};
use mixer_build::resolver::{Resolution, ResolveError};
use mixer_build::util::diagnostic::{emit, Diagnostic};
use mixer_build::util::{Config, GlobalContext};

/// Settings shared by every command.
pub struct Session {
    pub ctx: GlobalContext,
    pub config: Config,
    pub plugin_root: PathBuf,
}

impl Session {
    pub fn new(plugin_dir: Option<PathBuf>, verbose: bool, color: bool) -> Result<Self> {
        let mut ctx = match plugin_dir {
            Some(dir) => GlobalContext::with_cwd(dir),
            None => GlobalContext::new()?,
        };
        ctx.set_verbose(verbose);
        ctx.set_color(color);

        let plugin_root = ctx.plugin_root();
        let config = ctx.load_config()?;
        tracing::debug!("plugin root: {}", plugin_root.display());

        Ok(Session {
            ctx,
            config,
            plugin_root,
        })
    }

    /// Resolve the platform named on the command line.
    ///
    /// Resolver errors are printed as diagnostics before being returned;
    /// resolution warnings go to stderr.
    pub fn resolve(&self, args: &PlatformArgs) -> Result<Resolution> {
        let opts = ResolveOptions {
            platform: args.platform.clone(),
            backend: args.backend,
            strict: args.strict,
        };

        let resolution = match resolve_platform(&self.config, &self.plugin_root, &opts) {
            Ok(resolution) => resolution,
            Err(e) => {
                if let Some(err) = e.downcast_ref::<ResolveError>() {
                    emit(&err.to_diagnostic(), self.ctx.color());
                }
                return Err(e);
            }
        };

        for warning in &resolution.warnings {
            emit(&Diagnostic::warning(warning), self.ctx.color());
        }

        Ok(resolution)
    }
}
