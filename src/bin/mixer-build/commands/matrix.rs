//! `mixer-build matrix` command
//!
//! Resolves every known platform and prints one row per platform.

use anyhow::{Context, Result};

use super::Session;
use crate::cli::MatrixArgs;
use mixer_build::ops::emit::format_matrix;
use mixer_build::ops::resolve::resolve_matrix;
use mixer_build::util::diagnostic::{emit, Diagnostic};

pub fn execute(session: &Session, args: MatrixArgs) -> Result<()> {
    let rows = resolve_matrix(&session.config, &session.plugin_root, args.backend)?;

    for row in &rows {
        for warning in &row.warnings {
            emit(
                &Diagnostic::warning(format!("{}: {}", row.platform, warning)),
                session.ctx.color(),
            );
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&rows).context("failed to serialize matrix")?;
        println!("{}", json);
    } else {
        print!("{}", format_matrix(&rows));
    }

    Ok(())
}
