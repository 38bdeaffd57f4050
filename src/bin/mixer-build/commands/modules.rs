//! `mixer-build modules` command

use anyhow::{Context, Result};

use super::Session;
use crate::cli::ModulesArgs;
use mixer_build::ops::modules::{format_plan, module_plan};

pub fn execute(session: &Session, args: ModulesArgs) -> Result<()> {
    let resolution = session.resolve(&args.target)?;
    let plan = module_plan(&resolution)?;

    if args.json {
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize module plan")?;
        println!("{}", json);
    } else {
        println!("# Plugin modules for {} ({}):", resolution.platform, resolution.backend);
        print!("{}", format_plan(&plan));
    }

    Ok(())
}
