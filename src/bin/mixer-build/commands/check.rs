//! `mixer-build check` command

use anyhow::Result;

use super::Session;
use crate::cli::CheckArgs;
use mixer_build::ops::check::{check_libraries, format_report};
use mixer_build::util::diagnostic::emit;

pub fn execute(session: &Session, args: CheckArgs) -> Result<()> {
    let resolution = session.resolve(&args.target)?;
    let report = check_libraries(&resolution);

    println!(
        "Checking {} libraries for {} ({}):",
        report.libraries.len(),
        resolution.platform,
        resolution.backend
    );
    print!("{}", format_report(&report));

    if let Some(diag) = report.to_diagnostic() {
        emit(&diag, session.ctx.color());
        anyhow::bail!("{} of {} libraries missing", report.missing().len(), report.libraries.len());
    }

    Ok(())
}
