//! Configuration types for Flowcode chart generation.
//!
//! This module provides configuration structures that control how source is
//! parsed and how charts are laid out and styled. All types implement
//! [`serde::Deserialize`] and default every missing field, so a configuration
//! file only needs to mention the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser, layout and style settings.
//! - [`ParserConfig`] - Limits applied while parsing.
//! - [`LayoutConfig`] - Spacing and footprint constants of the layout engine.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use flowcode::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width(), 160.0);
//! assert!(config.style().stroke_color().is_ok());
//! ```

use serde::Deserialize;

use flowcode_core::color::{Color, ColorError};

pub use flowcode_parser::ParserConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            parser,
            layout,
            style,
        }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing constants of the layout engine, in pixels.
///
/// Decisions are drawn as squares of `decision_size` rotated by 45 degrees.
/// Their on-screen footprint is given explicitly by `decision_height` and
/// `decision_half_width` rather than derived from the rotation, so the two
/// can be tuned independently.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    origin_x: f32,
    origin_y: f32,
    node_width: f32,
    node_height: f32,
    vertical_gap: f32,
    horizontal_gap: f32,
    decision_size: f32,
    decision_height: f32,
    decision_half_width: f32,
    loop_return_offset: f32,
    loop_exit_offset: f32,
    lane_clearance: f32,
    max_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 400.0,
            origin_y: 50.0,
            node_width: 160.0,
            node_height: 60.0,
            vertical_gap: 120.0,
            horizontal_gap: 340.0,
            decision_size: 160.0,
            decision_height: 226.0,
            decision_half_width: 113.0,
            loop_return_offset: 140.0,
            loop_exit_offset: 260.0,
            lane_clearance: 40.0,
            max_depth: 64,
        }
    }
}

impl LayoutConfig {
    /// Column of the root sequence.
    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    /// Top of the first root node.
    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Vertical space between consecutive shapes.
    pub fn vertical_gap(&self) -> f32 {
        self.vertical_gap
    }

    /// Distance from a decision's column to its false-branch column.
    pub fn horizontal_gap(&self) -> f32 {
        self.horizontal_gap
    }

    /// Side of the unrotated decision square.
    pub fn decision_size(&self) -> f32 {
        self.decision_size
    }

    /// Vertical space a decision occupies.
    pub fn decision_height(&self) -> f32 {
        self.decision_height
    }

    /// Distance from a decision's center to its left and right vertices.
    pub fn decision_half_width(&self) -> f32 {
        self.decision_half_width
    }

    /// Minimum distance from a loop's column to its return lane.
    pub fn loop_return_offset(&self) -> f32 {
        self.loop_return_offset
    }

    /// Minimum distance from a loop's column to its exit lane.
    pub fn loop_exit_offset(&self) -> f32 {
        self.loop_exit_offset
    }

    /// Free space kept between a routing lane or column and nearby content.
    pub fn lane_clearance(&self) -> f32 {
        self.lane_clearance
    }

    /// Deepest nesting the layout engine accepts.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Visual styling configuration for rendered charts.
///
/// Fields that are not set fall back to the exporter's defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Canvas background, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Shape outlines, connectors and text.
    #[serde(default)]
    stroke_color: Option<String>,

    /// Shape fill.
    #[serde(default)]
    fill_color: Option<String>,

    /// Dashed loop return connectors.
    #[serde(default)]
    back_edge_color: Option<String>,
}

const DEFAULT_BACKGROUND: &str = "white";
const DEFAULT_STROKE: &str = "#555555";
const DEFAULT_FILL: &str = "#f8f9fa";
const DEFAULT_BACK_EDGE: &str = "#777777";

fn parse_color(value: Option<&str>, default: &str) -> Result<Color, ColorError> {
    Color::new(value.unwrap_or(default))
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Color, ColorError> {
        parse_color(self.background_color.as_deref(), DEFAULT_BACKGROUND)
    }

    /// Returns the parsed stroke [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, ColorError> {
        parse_color(self.stroke_color.as_deref(), DEFAULT_STROKE)
    }

    /// Returns the parsed fill [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn fill_color(&self) -> Result<Color, ColorError> {
        parse_color(self.fill_color.as_deref(), DEFAULT_FILL)
    }

    /// Returns the parsed [`Color`] of loop return connectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn back_edge_color(&self) -> Result<Color, ColorError> {
        parse_color(self.back_edge_color.as_deref(), DEFAULT_BACK_EDGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();

        assert_eq!(layout.origin_x(), 400.0);
        assert_eq!(layout.origin_y(), 50.0);
        assert_eq!(layout.horizontal_gap(), 340.0);
        assert_eq!(layout.decision_height(), 226.0);
        assert_eq!(layout.max_depth(), 64);
    }

    #[test]
    fn test_style_defaults_parse() {
        let style = StyleConfig::default();

        assert!(style.background_color().is_ok());
        assert!(style.stroke_color().is_ok());
        assert!(style.fill_color().is_ok());
        assert!(style.back_edge_color().is_ok());
    }

    #[test]
    fn test_invalid_style_color() {
        let style = StyleConfig::default().with_stroke_color("definitely-not-a-color");
        assert!(style.stroke_color().is_err());
    }

    #[test]
    fn test_builders() {
        let layout = LayoutConfig::default().with_origin(0.0, 10.0).with_max_depth(3);

        assert_eq!(layout.origin_x(), 0.0);
        assert_eq!(layout.origin_y(), 10.0);
        assert_eq!(layout.max_depth(), 3);
    }
}
