//! Flowcode - Convert C-like procedural code into flowcharts.
//!
//! This library parses C-like source into a flow tree, lays the tree out as a
//! column-based chart with orthogonal connectors, and renders the result to
//! SVG.

pub mod config;
pub mod layout;

mod error;
mod export;

pub use flowcode_core::{color, flow, geometry, scene};
pub use flowcode_parser::repair;

pub use error::FlowcodeError;

use std::path::Path;

use log::{debug, info, trace};

use flowcode_core::{flow::Program, scene::Scene};

use config::AppConfig;
use export::Exporter;
use layout::LayoutEngine;

/// Builder for parsing, laying out and rendering flowcharts.
///
/// The builder holds only configuration, so one instance can process any
/// number of sources.
///
/// # Examples
///
/// ```rust
/// use flowcode::{FlowchartBuilder, config::AppConfig};
///
/// let source = "int main() { int x = 1; return 0; }";
///
/// let builder = FlowchartBuilder::new(AppConfig::default());
/// let program = builder.parse(source).expect("Failed to parse");
/// let scene = builder.layout(&program).expect("Failed to lay out");
/// let svg = builder.render_svg(&scene).expect("Failed to render");
///
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct FlowchartBuilder {
    config: AppConfig,
}

impl FlowchartBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the repair heuristics over `source`.
    ///
    /// The returned [`repair::Analysis`] lists one warning per proposed fix
    /// and carries the fixed text. Nothing is applied automatically.
    pub fn analyze(&self, source: &str) -> repair::Analysis {
        let analysis = repair::analyze(source);
        debug!(issues_count = analysis.diagnostics().len(); "Source analyzed");
        analysis
    }

    /// Parse source code into a flow tree.
    ///
    /// # Errors
    ///
    /// Returns [`FlowcodeError::Parse`] when blocks nest deeper than the
    /// configured parser limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowcode::{FlowchartBuilder, flow::NodeKind};
    ///
    /// let builder = FlowchartBuilder::default();
    /// let program = builder.parse("while (i < 3) { i++; }").unwrap();
    /// assert_eq!(program.nodes()[1].kind(), NodeKind::Loop);
    /// ```
    pub fn parse(&self, source: &str) -> Result<Program, FlowcodeError> {
        info!("Building flow tree");
        let program = flowcode_parser::parse(source, *self.config.parser())
            .map_err(|err| FlowcodeError::new_parse_error(err, source))?;
        debug!(nodes_count = program.node_count(); "Flow tree built successfully");
        trace!(program:?; "Flow tree");
        Ok(program)
    }

    /// Position every node of `program` and route its connectors.
    ///
    /// # Errors
    ///
    /// Returns [`FlowcodeError::Layout`] when the tree nests deeper than the
    /// configured layout limit.
    pub fn layout(&self, program: &Program) -> Result<Scene, FlowcodeError> {
        info!("Calculating layout");
        let engine = LayoutEngine::new(*self.config.layout());
        let scene = engine.layout(program)?;
        info!(
            boxes_count = scene.boxes().len(),
            edges_count = scene.edges().len();
            "Layout calculated",
        );
        Ok(scene)
    }

    /// Render a laid-out scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`FlowcodeError::Export`] if a configured style color is
    /// invalid.
    pub fn render_svg(&self, scene: &Scene) -> Result<String, FlowcodeError> {
        let svg = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let document = svg.render_scene(scene);

        info!("SVG rendered successfully");
        Ok(document.to_string())
    }

    /// Render a laid-out scene straight into an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`FlowcodeError::Export`] for invalid style colors or when the
    /// file cannot be written.
    pub fn write_svg(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<(), FlowcodeError> {
        let mut svg_exporter = export::svg::SvgBuilder::new()
            .with_output_path(path)
            .with_style(self.config.style())
            .build()?;

        svg_exporter.export_scene(scene)?;
        Ok(())
    }

    /// Parse, lay out and render `source` in one step.
    ///
    /// # Errors
    ///
    /// Any error of [`parse`](Self::parse), [`layout`](Self::layout) or
    /// [`render_svg`](Self::render_svg).
    pub fn convert(&self, source: &str) -> Result<String, FlowcodeError> {
        let program = self.parse(source)?;
        let scene = self.layout(&program)?;
        self.render_svg(&scene)
    }
}
