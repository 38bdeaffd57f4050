//! Terminal diagnostics.
//!
//! A diagnostic carries the failing condition, the facts behind it and the
//! fixes a user can try, rendered rustc-style on stderr.

use std::fmt;
use std::path::PathBuf;

/// Suggestions shared by several diagnostics.
pub mod suggestions {
    /// A platform name was not recognised.
    pub const UNKNOWN_PLATFORM: &str = "Run `mixer-build matrix` to see the supported platforms";

    /// Declared libraries are missing on disk.
    pub const MISSING_LIBRARIES: &str =
        "Check `resolver.third_party` and `resolver.layout` in .mixer-build/config.toml";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }

    /// ANSI SGR parameters for the label.
    fn ansi(&self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn paint(text: &str, ansi: &str, color: bool) -> String {
    if color {
        format!("\x1b[{}m{}\x1b[0m", ansi, text)
    } else {
        text.to_string()
    }
}

/// A message with supporting facts and suggested fixes.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Facts shown under the message as `= ...`
    pub context: Vec<String>,
    /// Numbered fixes shown under `help:`
    pub suggestions: Vec<String>,
    /// Directory or file the diagnostic is about
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, with ANSI colors when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let mut lines = vec![format!(
            "{}: {}",
            paint(self.severity.label(), self.severity.ansi(), color),
            self.message
        )];

        if let Some(ref path) = self.location {
            lines.push(format!("  --> {}", path.display()));
        }
        lines.extend(self.context.iter().map(|c| format!("  = {}", c)));

        if !self.suggestions.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}: consider:", paint("help", "1;32", color)));
            lines.extend(
                self.suggestions
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("  {}. {}", i + 1, s)),
            );
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("platform `Switch` has no interactivity SDK")
            .with_context("known platforms: Win32, Win64")
            .with_suggestion("Drop `--strict` to build with the null backend")
            .with_location("ThirdParty/Lib");

        let output = diag.format(false);
        assert!(output.starts_with("error: platform `Switch`"));
        assert!(output.contains("\n  --> ThirdParty/Lib\n"));
        assert!(output.contains("\n  = known platforms"));
        assert!(output.contains("\n\nhelp: consider:\n"));
        assert!(output.ends_with("  1. Drop `--strict` to build with the null backend\n"));
    }

    #[test]
    fn test_warning_without_suggestions() {
        let output = Diagnostic::warning("backend overridden").format(false);
        assert_eq!(output, "warning: backend overridden\n");
    }

    #[test]
    fn test_color_wraps_severity() {
        let output = Diagnostic::note("n").format(true);
        assert_eq!(output, "\x1b[1;36mnote\x1b[0m: n\n");
    }
}
