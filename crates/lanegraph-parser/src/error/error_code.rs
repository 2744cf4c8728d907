//! Error codes for git log diagnostics.
//!
//! Codes are grouped by phase:
//! - `E1xx` - Line syntax errors
//! - `E2xx` - Commit graph validation errors
//! - `W2xx` - Commit graph warnings; the dump is repaired and still laid out

use std::fmt;

use crate::error::Severity;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A hash field contains something other than hexadecimal digits, or a
    /// line starts with something that is not a commit hash.
    E100,

    /// Missing field separator.
    ///
    /// The commit hash is not followed by the `|` separating it from the
    /// parent hashes.
    E101,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Duplicate commit.
    ///
    /// The same commit hash appears on more than one line.
    E200,

    /// Self-referencing commit.
    ///
    /// A commit lists its own hash among its parents.
    E201,

    // =========================================================================
    // Validation Warnings (W2xx)
    // =========================================================================
    /// Repeated parent.
    ///
    /// A commit lists the same parent more than once. Only the first listing
    /// is kept.
    W200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::W200 => "W200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected character",
            ErrorCode::E101 => "missing field separator",
            ErrorCode::E200 => "duplicate commit",
            ErrorCode::E201 => "commit is its own parent",
            ErrorCode::W200 => "repeated parent",
        }
    }

    /// Returns how serious diagnostics with this code are.
    pub fn severity(&self) -> Severity {
        match self {
            ErrorCode::W200 => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
