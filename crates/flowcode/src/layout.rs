//! Layout engine for positioning flowchart shapes.
//!
//! This module transforms a parsed [`Program`](flowcode_core::flow::Program)
//! into a [`Scene`](flowcode_core::scene::Scene) of positioned boxes and routed
//! orthogonal edges.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Program (flow tree)
//!     ↓ layout (this module)
//! Scene
//!     ↓ export
//! Output
//! ```
//!
//! # Submodules
//!
//! - `engine` - Recursive column placement of sequences and decisions
//! - `placement` - The per-sequence result threaded through recursion
//! - `routing` - Orthogonal connector construction

mod engine;
mod placement;
mod routing;

pub use engine::LayoutEngine;
pub use placement::Placement;

use thiserror::Error;

/// Errors produced by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The flow tree nests deeper than the configured maximum.
    #[error("flow nesting exceeds the maximum depth of {max_depth}")]
    TooDeep { max_depth: usize },
}
