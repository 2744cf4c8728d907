//! Error types for Lanegraph operations.
//!
//! This module provides the main error type [`LanegraphError`] which wraps
//! the error conditions that can occur while parsing and laying out a commit
//! history. Reading and writing files is left to the caller.

use thiserror::Error;

use lanegraph_parser::error::ParseError;

/// The main error type for Lanegraph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so callers can render labeled source snippets.
#[derive(Debug, Error)]
pub enum LanegraphError {
    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Layout error: {0}")]
    Layout(String),
}

impl LanegraphError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
