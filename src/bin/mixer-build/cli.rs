//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use mixer_build::Backend;

/// mixer-build - resolve the Mixer interactivity plugin's build wiring per platform
#[derive(Parser)]
#[command(name = "mixer-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Plugin directory (defaults to the nearest directory with a .uplugin)
    #[arg(long, global = true, env = "MIXER_BUILD_PLUGIN_DIR")]
    pub plugin_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve backend, definitions and libraries for a platform
    Resolve(ResolveArgs),

    /// Show compile/link flags for a platform
    Flags(FlagsArgs),

    /// Show the resolution of every known platform
    Matrix(MatrixArgs),

    /// Show the plugin modules and their dependencies for a platform
    Modules(ModulesArgs),

    /// Check that declared libraries exist on disk
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Platform selection shared by most commands.
#[derive(Args)]
pub struct PlatformArgs {
    /// Target platform (Win32, Win64, XboxOne, UWP32, UWP64, ...)
    pub platform: String,

    /// Backend to build with (native-v1, native-v2, null, engine)
    #[arg(short, long)]
    pub backend: Option<Backend>,

    /// Fail on platforms without an interactivity SDK
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub target: PlatformArgs,

    /// Output format (text, json, flags)
    #[arg(long)]
    pub format: Option<String>,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub target: PlatformArgs,

    /// Show compile flags only
    #[arg(long, conflicts_with = "link")]
    pub compile: bool,

    /// Show link flags only
    #[arg(long)]
    pub link: bool,

    /// Flag dialect (msvc, gnu)
    #[arg(long)]
    pub style: Option<String>,
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Backend to request on every platform
    #[arg(short, long)]
    pub backend: Option<Backend>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ModulesArgs {
    #[command(flatten)]
    pub target: PlatformArgs,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: PlatformArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
