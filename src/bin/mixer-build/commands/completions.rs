//! `mixer-build completions` command

use std::io;

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};

pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    clap_complete::generate(args.shell, &mut cmd, bin_name, &mut io::stdout().lock());

    Ok(())
}
