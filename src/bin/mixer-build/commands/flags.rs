//! `mixer-build flags` command

use anyhow::Result;

use super::Session;
use crate::cli::FlagsArgs;
use mixer_build::core::FlagStyle;
use mixer_build::ops::emit::{format_flags, FlagSections};

pub fn execute(session: &Session, args: FlagsArgs) -> Result<()> {
    let resolution = session.resolve(&args.target)?;

    let style: FlagStyle = match args.style {
        Some(ref s) => s.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => session.config.flag_style()?,
    };

    let sections = FlagSections {
        compile: !args.link,
        link: !args.compile,
    };

    print!("{}", format_flags(&resolution, style, sections));

    Ok(())
}
