//! Diagnostics reported while reading a git log dump.
//!
//! Every problem found in the input becomes a [`Diagnostic`]: an
//! [`ErrorCode`] fixing its severity, a message, labeled
//! [`Span`](crate::Span)s and an optional help line. When any of them is an
//! error, all diagnostics of the parse are returned together inside a
//! [`ParseError`], so a dump with several broken lines is reported in one go.
//! Warnings of a successful parse are logged.
//!
//! # Example
//!
//! ```
//! # use lanegraph_parser::error::{Diagnostic, ErrorCode};
//! # use lanegraph_parser::Span;
//! let diag = Diagnostic::new(ErrorCode::E200, "commit `a1b2` is listed more than once")
//!     .with_label(Span::new(40..44), "duplicate commit")
//!     .with_secondary_label(Span::new(0..4), "first listed here");
//!
//! assert_eq!(diag.labels().len(), 2);
//! ```

mod diagnostic;
mod error_code;

use std::fmt;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;

/// Error type for a failed parse.
///
/// Wraps every diagnostic collected while reading the input.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lead with an error when warnings came first.
        let lead = self
            .diagnostics
            .iter()
            .find(|diag| diag.severity() == Severity::Error)
            .or_else(|| self.diagnostics.first());
        if let Some(first) = lead {
            write!(f, "{first}")?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}

/// Accumulates diagnostics across a phase instead of stopping at the first.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic; errors make [`DiagnosticCollector::finish`] fail.
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity() == Severity::Error {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `Err` with every collected diagnostic if any of them is an
    /// error, otherwise the warnings.
    pub(crate) fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
