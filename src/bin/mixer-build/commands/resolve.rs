//! `mixer-build resolve` command

use anyhow::Result;

use super::Session;
use crate::cli::ResolveArgs;
use mixer_build::ops::emit::{format_resolution, OutputFormat};

pub fn execute(session: &Session, args: ResolveArgs) -> Result<()> {
    let resolution = session.resolve(&args.target)?;

    let format: OutputFormat = match args.format.as_ref().or(session.config.output.format.as_ref()) {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => OutputFormat::default(),
    };
    let style = session.config.flag_style()?;

    print!("{}", format_resolution(&resolution, format, style)?);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
