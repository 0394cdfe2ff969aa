//! Expression diagnostics
//!
//! This module explains what the converter will do with an expression and
//! flags input it cannot handle cleanly:
//!
//! - Embedded whitespace
//! - Characters outside the expression alphabet
//! - Exception-table hits and the resolved kind
//! - Unit input left unconsumed by the unit formatter
//!
//! ## Example
//!
//! ```rust
//! use sciscript::diagnostics::check_expression;
//! use sciscript::Options;
//!
//! let result = check_expression("m2(s)", &Options::default());
//! assert!(result.has_errors());
//! ```

use std::fmt;

use crate::core::{classify, parse_unit, ExpressionKind, Options};
use crate::features::span::is_expression_char;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output is produced but may not be what was meant
    Warning,
    /// Error - part of the input is passed through unformatted
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Column (1-indexed)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add a 1-indexed column from a byte offset
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.column = Some(offset + 1);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if let Some(col) = self.column {
            write!(f, "\n  --> column {}", col)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
            if let Some(col) = self.column {
                write!(f, "\n  | {}^", " ".repeat(col - 1))?;
            }
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// Kind the classifier chose
    pub kind: ExpressionKind,
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check an expression for issues
pub fn check_expression(raw: &str, options: &Options) -> CheckResult {
    let mut result = CheckResult::new();
    result.kind = classify(raw, options);

    if raw.is_empty() {
        result.add(Diagnostic::new(DiagnosticLevel::Info, "empty expression"));
        return result;
    }

    check_characters(raw, &mut result);

    if options.exception(raw).is_some() {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                "exact match in the exception table; heuristics are skipped",
            )
            .with_source(raw),
        );
        return result;
    }

    result.add(Diagnostic::new(
        DiagnosticLevel::Info,
        format!("classified as {}", result.kind),
    ));

    if result.kind == ExpressionKind::Unit {
        check_unit_remainder(raw, &mut result);
    }

    result
}

/// Flag whitespace and characters outside the expression alphabet
fn check_characters(raw: &str, result: &mut CheckResult) {
    for (offset, c) in raw.char_indices() {
        if c.is_whitespace() {
            result.add(
                Diagnostic::new(DiagnosticLevel::Warning, "embedded whitespace")
                    .at_offset(offset)
                    .with_source(raw)
                    .with_suggestion("Molecules drop spaces; units treat a space like '.'"),
            );
        } else if !is_expression_char(c) {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("unexpected character '{}'", c),
                )
                .at_offset(offset)
                .with_source(raw)
                .with_suggestion("The character is passed through unchanged"),
            );
        }
    }
}

/// Report the part of a unit expression the term scanner could not consume
fn check_unit_remainder(raw: &str, result: &mut CheckResult) {
    if let Some((offset, rest)) = parse_unit(raw).remainder {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!("unit scan stopped; '{}' is left unformatted", rest),
            )
            .at_offset(offset)
            .with_source(raw)
            .with_suggestion("Force molecule mode or add an exception for this expression"),
        );
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_molecule() {
        let result = check_expression("H2O", &Options::default());
        assert_eq!(result.kind, ExpressionKind::Molecule);
        assert!(!result.has_errors());
        assert_eq!(result.warnings, 0);
    }

    #[test]
    fn test_unit_remainder_is_error() {
        let result = check_expression("m2(s)", &Options::default());
        assert_eq!(result.kind, ExpressionKind::Unit);
        assert!(result.has_errors());
        let err = result
            .diagnostics
            .iter()
            .find(|d| d.level == DiagnosticLevel::Error)
            .unwrap();
        assert_eq!(err.column, Some(3));
    }

    #[test]
    fn test_whitespace_warning() {
        let result = check_expression("H2 O", &Options::default());
        assert_eq!(result.warnings, 1);
    }

    #[test]
    fn test_unexpected_character() {
        let result = check_expression("H2O!", &Options::default());
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains('!'));
    }

    #[test]
    fn test_exception_note() {
        let opts = Options::default().with_exception("m2(s)", "m$^2$(s)");
        let result = check_expression("m2(s)", &opts);
        assert_eq!(result.kind, ExpressionKind::Molecule);
        assert!(!result.has_errors());
        assert!(result.diagnostics[0].message.contains("exception"));
    }

    #[test]
    fn test_display_with_caret() {
        let diag = Diagnostic::new(DiagnosticLevel::Error, "bad")
            .at_offset(2)
            .with_source("m2(s)");
        let text = diag.to_string();
        assert!(text.contains("column 3"));
        assert!(text.contains("  |   ^"));
    }

    #[test]
    fn test_summary_format() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));

        let summary = result.summary();
        assert!(summary.contains("1 error"));
        assert!(summary.contains("1 warning"));
        assert_eq!(CheckResult::new().summary(), "no issues found");
    }
}
