//! Check that declared third-party libraries exist on disk.
//!
//! The resolver only declares libraries; a missing one would otherwise
//! surface as a link error much later in the build.

use std::fmt::Write as _;

use crate::core::surface::LibraryRequirement;
use crate::resolver::Resolution;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::hash::short_file_digest;

/// Status of one declared library.
#[derive(Debug, Clone)]
pub struct LibraryStatus {
    pub library: LibraryRequirement,
    /// Short SHA256 of the file when present
    pub checksum: Option<String>,
}

impl LibraryStatus {
    pub fn is_found(&self) -> bool {
        self.checksum.is_some()
    }
}

/// Result of checking a resolution's libraries.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub libraries: Vec<LibraryStatus>,
}

impl CheckReport {
    /// Libraries that could not be found.
    pub fn missing(&self) -> Vec<&LibraryRequirement> {
        self.libraries
            .iter()
            .filter(|s| !s.is_found())
            .map(|s| &s.library)
            .collect()
    }

    /// True when every declared library was found.
    pub fn is_ok(&self) -> bool {
        self.libraries.iter().all(LibraryStatus::is_found)
    }

    /// Diagnostic describing the missing libraries, if any.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        let missing = self.missing();
        if missing.is_empty() {
            return None;
        }

        let mut diag = Diagnostic::error(format!(
            "{} declared librar{} not found",
            missing.len(),
            if missing.len() == 1 { "y" } else { "ies" }
        ));
        if let Some(first) = missing.first() {
            diag = diag.with_location(first.search_path.clone());
        }
        for lib in &missing {
            diag = diag.with_context(format!("missing {}", lib.path().display()));
        }
        Some(diag.with_suggestion(suggestions::MISSING_LIBRARIES))
    }
}

/// Look up every library of a resolution in its search path.
pub fn check_libraries(resolution: &Resolution) -> CheckReport {
    let libraries = resolution
        .link
        .libs
        .iter()
        .map(|lib| {
            let path = lib.path();
            let checksum = if path.is_file() {
                match short_file_digest(&path) {
                    Ok(digest) => Some(digest),
                    Err(e) => {
                        tracing::warn!("failed to hash {}: {:#}", path.display(), e);
                        None
                    }
                }
            } else {
                None
            };

            tracing::debug!(
                "{} {}",
                lib.name,
                if checksum.is_some() { "found" } else { "missing" }
            );

            LibraryStatus {
                library: lib.clone(),
                checksum,
            }
        })
        .collect();

    CheckReport { libraries }
}

/// Format a check report for terminal output.
pub fn format_report(report: &CheckReport) -> String {
    let mut out = String::new();

    if report.libraries.is_empty() {
        out.push_str("No libraries declared.\n");
        return out;
    }

    for status in &report.libraries {
        match status.checksum {
            Some(ref sum) => {
                let _ = writeln!(out, "  ok       {:<32} {}", status.library.name, sum);
            }
            None => {
                let _ = writeln!(out, "  missing  {}", status.library.name);
            }
        }
    }

    out
}
