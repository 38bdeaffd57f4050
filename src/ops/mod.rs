//! High-level operations.
//!
//! This module contains the implementation of the CLI commands.

pub mod check;
pub mod emit;
pub mod modules;
pub mod resolve;

pub use check::{check_libraries, format_report, CheckReport};
pub use emit::{format_flags, format_matrix, format_resolution, FlagSections, OutputFormat};
pub use modules::{format_plan, module_plan};
pub use resolve::{resolve_matrix, resolve_platform, MatrixRow, ResolveOptions};
