//! Flowcode Core Types
//!
//! This crate provides the types shared by the Flowcode parser, layout engine
//! and exporters:
//!
//! - **Flow**: the control-flow tree produced by parsing ([`flow`] module)
//! - **Geometry**: points, sizes and bounds ([`geometry`] module)
//! - **Scene**: positioned boxes and routed edges ([`scene`] module)
//! - **Colors**: CSS color handling for styles ([`color::Color`])

pub mod color;
pub mod flow;
pub mod geometry;
pub mod scene;
