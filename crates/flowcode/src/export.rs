//! Export functionality for Flowcode charts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting laid-out charts into output formats. It is the final stage in
//! the Flowcode processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Program (flow tree)
//!     ↓ layout
//! Scene (positioned boxes and edges)
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`FlowcodeError::Export`] at the crate
//! boundary.
//!
//! [`FlowcodeError::Export`]: crate::FlowcodeError::Export

/// SVG export backend.
pub mod svg;

use flowcode_core::scene::Scene;

/// Abstraction for chart export backends.
///
/// Implementors convert a [`Scene`] into a specific output format
/// (e.g., SVG).
pub trait Exporter {
    /// Exports a laid-out scene to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_scene(&mut self, scene: &Scene) -> Result<(), Error>;
}

/// Errors that can occur during chart export.
///
/// This type is converted into [`FlowcodeError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`FlowcodeError::Export`]: crate::FlowcodeError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
