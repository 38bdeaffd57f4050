//! mixer-build CLI - platform/backend resolver for the Mixer interactivity plugin

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("mixer_build=debug")
    } else {
        EnvFilter::new("mixer_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color;
    let session = || Session::new(cli.plugin_dir.clone(), cli.verbose, color);

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(&session()?, args),
        Commands::Flags(args) => commands::flags::execute(&session()?, args),
        Commands::Matrix(args) => commands::matrix::execute(&session()?, args),
        Commands::Modules(args) => commands::modules::execute(&session()?, args),
        Commands::Check(args) => commands::check::execute(&session()?, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
