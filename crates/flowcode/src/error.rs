//! Error types for Flowcode operations.
//!
//! This module provides the main error type [`FlowcodeError`] which wraps
//! the error conditions of every pipeline stage.

use std::io;

use thiserror::Error;

use flowcode_parser::error::ParseError;

use crate::layout::LayoutError;

/// The main error type for Flowcode operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics, so callers can render labelled snippets.
#[derive(Debug, Error)]
pub enum FlowcodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for FlowcodeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl FlowcodeError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
