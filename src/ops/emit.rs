//! Rendering of resolutions for humans and build tools.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::core::surface::{DefinitionScope, FlagStyle};
use crate::ops::resolve::MatrixRow;
use crate::resolver::Resolution;

/// Output format for resolutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Flags,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "flags" => Ok(OutputFormat::Flags),
            _ => Err(format!(
                "invalid output format '{}', valid values: text, json, flags",
                s
            )),
        }
    }
}

/// Which halves of the flag set to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSections {
    pub compile: bool,
    pub link: bool,
}

impl Default for FlagSections {
    fn default() -> Self {
        FlagSections {
            compile: true,
            link: true,
        }
    }
}

/// Render a resolution in the given format.
pub fn format_resolution(
    resolution: &Resolution,
    format: OutputFormat,
    style: FlagStyle,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(resolution)),
        OutputFormat::Json => format_json(resolution),
        OutputFormat::Flags => Ok(format_flags(resolution, style, FlagSections::default())),
    }
}

/// Serialize a resolution as pretty JSON.
pub fn format_json(resolution: &Resolution) -> Result<String> {
    serde_json::to_string_pretty(resolution).context("failed to serialize resolution")
}

/// Human-readable summary.
pub fn format_text(resolution: &Resolution) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Platform: {}", resolution.platform);
    let _ = writeln!(out, "Backend:  {}", resolution.backend);
    let _ = writeln!(out, "OAuth:    {}", if resolution.oauth() { "yes" } else { "no" });
    out.push('\n');

    out.push_str("Definitions:\n");
    for def in &resolution.compile.definitions {
        let scope = match def.scope {
            DefinitionScope::Private => "private",
            DefinitionScope::Public => "public",
        };
        let _ = writeln!(out, "  {:<36} ({})", def.define.to_string(), scope);
    }

    out.push_str("Include dirs:\n");
    for dir in &resolution.compile.include_dirs {
        let _ = writeln!(out, "  {}", dir.display());
    }

    if !resolution.link.lib_dirs.is_empty() {
        out.push_str("Library dirs:\n");
        for dir in &resolution.link.lib_dirs {
            let _ = writeln!(out, "  {}", dir.display());
        }
    }

    if !resolution.link.libs.is_empty() {
        out.push_str("Libraries:\n");
        for lib in &resolution.link.libs {
            let _ = writeln!(out, "  {}", lib.name);
        }
    }

    if !resolution.module_dependencies.is_empty() {
        out.push_str("Module dependencies:\n");
        for module in &resolution.module_dependencies {
            let _ = writeln!(out, "  {}", module.name);
        }
    }

    out
}

/// Compile and link flags, one per line.
pub fn format_flags(resolution: &Resolution, style: FlagStyle, sections: FlagSections) -> String {
    let mut flags = Vec::new();

    if sections.compile {
        for dir in &resolution.compile.include_dirs {
            flags.push(match style {
                FlagStyle::Msvc => format!("/I{}", dir.display()),
                FlagStyle::Gnu => format!("-I{}", dir.display()),
            });
        }
        for define in resolution.defines() {
            flags.push(define.to_flag_with(style));
        }
    }

    if sections.link {
        for dir in &resolution.link.lib_dirs {
            flags.push(match style {
                FlagStyle::Msvc => format!("/LIBPATH:{}", dir.display()),
                FlagStyle::Gnu => format!("-L{}", dir.display()),
            });
        }
        for lib in &resolution.link.libs {
            flags.push(lib.to_flag(style));
        }
    }

    let mut out = flags.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Table of matrix rows.
pub fn format_matrix(rows: &[MatrixRow]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<10} {:<10} {:<6} {:<5} {:<22} {}",
        "PLATFORM", "BACKEND", "OAUTH", "LIBS", "MODULES", "FINGERPRINT"
    );
    for row in rows {
        let modules = if row.module_dependencies.is_empty() {
            "-".to_string()
        } else {
            row.module_dependencies.join(",")
        };
        let _ = writeln!(
            out,
            "{:<10} {:<10} {:<6} {:<5} {:<22} {}",
            row.platform.as_str(),
            row.backend.as_str(),
            if row.oauth { "yes" } else { "no" },
            row.libraries,
            modules,
            row.fingerprint
        );
    }

    out
}
