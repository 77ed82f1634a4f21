//! SVG export backend.
//!
//! [`SvgBuilder`] resolves the style configuration into an [`Svg`] renderer.
//! [`Svg::render_scene`] produces an in-memory [`svg::Document`]; the
//! [`Exporter`] implementation writes the same document to a file.

mod edges;
mod nodes;

use std::path::{Path, PathBuf};

use log::{debug, info};
use svg::{self, node::element as svg_element};

use flowcode_core::{
    color::{Color, ColorError},
    geometry::{Bounds, Insets, Size},
    scene::Scene,
};

use super::{Error, Exporter};
use crate::config::StyleConfig;

/// Space left around the chart on every side.
const CANVAS_PADDING: f32 = 40.0;

/// Colors resolved from a [`StyleConfig`].
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    stroke: Color,
    fill: Color,
    back_edge: Color,
}

impl Palette {
    fn from_style(style: &StyleConfig) -> Result<Self, Error> {
        fn resolve(color: Result<Color, ColorError>) -> Result<Color, Error> {
            color.map_err(|err| Error::Render(err.to_string()))
        }

        Ok(Self {
            background: resolve(style.background_color())?,
            stroke: resolve(style.stroke_color())?,
            fill: resolve(style.fill_color())?,
            back_edge: resolve(style.back_edge_color())?,
        })
    }
}

/// Builder for [`Svg`] renderers.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    output_path: Option<PathBuf>,
    style: StyleConfig,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file written by [`Exporter::export_scene`].
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Resolves the configured colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let palette = Palette::from_style(&self.style)?;
        debug!(palette:?; "SVG palette resolved");

        Ok(Svg {
            output_path: self.output_path,
            palette,
            padding: Insets::uniform(CANVAS_PADDING),
        })
    }
}

/// SVG renderer for laid-out scenes.
#[derive(Debug)]
pub struct Svg {
    output_path: Option<PathBuf>,
    palette: Palette,
    padding: Insets,
}

impl Svg {
    /// Renders the scene to an SVG document.
    ///
    /// Edges are drawn first, then boxes, then edge labels, so that labels
    /// stay readable where they overlap a shape.
    pub fn render_scene(&self, scene: &Scene) -> svg::Document {
        let canvas = self.canvas_bounds(scene);
        let svg_size = canvas.to_size();

        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        let doc = self.add_background(doc, svg_size);
        let doc = doc.add(self.marker_definitions());

        // Shift the content so the padded bounds start at the origin.
        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", -canvas.min_x(), -canvas.min_y()),
        );

        let mut labels = Vec::new();
        for edge in scene.edges() {
            main_group = main_group.add(self.render_edge(edge));
            if let Some(label) = self.render_edge_label(edge) {
                labels.push(label);
            }
        }
        for layout_box in scene.boxes() {
            main_group = main_group.add(self.render_box(layout_box));
        }
        let main_group = labels
            .into_iter()
            .fold(main_group, |group, label| group.add(label));

        debug!(
            width = svg_size.width(),
            height = svg_size.height(),
            boxes_count = scene.boxes().len(),
            edges_count = scene.edges().len();
            "Scene rendered",
        );
        doc.add(main_group)
    }

    fn add_background(&self, doc: svg::Document, size: Size) -> svg::Document {
        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", self.palette.background.to_string());
        doc.add(background)
    }

    /// The area the rendered document covers in scene coordinates.
    pub fn canvas_bounds(&self, scene: &Scene) -> Bounds {
        scene
            .bounds()
            .unwrap_or_default()
            .add_padding(self.padding)
    }
}

impl Exporter for Svg {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), Error> {
        let Some(path) = &self.output_path else {
            return Err(Error::Render("no output path configured".to_string()));
        };

        let document = self.render_scene(scene);
        svg::save(path, &document).map_err(Error::Io)?;

        info!(path = path.display().to_string(); "SVG written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use flowcode_core::flow::{Node, Program};

    use super::*;
    use crate::{config::LayoutConfig, layout::LayoutEngine};

    fn scene_for(nodes: Vec<Node>) -> Scene {
        LayoutEngine::new(LayoutConfig::default())
            .layout(&Program::new(nodes))
            .unwrap()
    }

    #[test]
    fn test_render_contains_shapes() {
        let scene = scene_for(vec![
            Node::io("Input n"),
            Node::looping("n > 0", vec![Node::process("n--")]),
            Node::end(),
        ]);
        let svg = SvgBuilder::new()
            .build()
            .unwrap()
            .render_scene(&scene)
            .to_string();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("node-start"));
        assert!(svg.contains("node-io"));
        assert!(svg.contains("node-loop"));
        assert!(svg.contains("node-process"));
        assert!(svg.contains("node-end"));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("marker-end"));
        assert!(svg.contains("False"));
        assert!(svg.contains("True"));
    }

    #[test]
    fn test_canvas_covers_scene() {
        let scene = scene_for(vec![Node::branch(
            "x",
            vec![Node::process("a")],
            vec![Node::process("b")],
        )]);
        let svg = SvgBuilder::new().build().unwrap();

        let canvas = svg.canvas_bounds(&scene);
        let content = scene.bounds().unwrap();
        assert!(approx_eq!(f32, canvas.min_x(), content.min_x() - CANVAS_PADDING));
        assert!(approx_eq!(f32, canvas.max_y(), content.max_y() + CANVAS_PADDING));
    }

    #[test]
    fn test_empty_scene_renders() {
        let svg = SvgBuilder::new()
            .build()
            .unwrap()
            .render_scene(&Scene::default())
            .to_string();

        assert!(svg.contains("<svg"));
        assert!(!svg.contains("node-"));
    }

    #[test]
    fn test_invalid_style_fails_to_build() {
        let style = StyleConfig::default().with_background_color("nope nope");
        let result = SvgBuilder::new().with_style(&style).build();

        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_export_without_path_fails() {
        let mut svg = SvgBuilder::new().build().unwrap();
        let result = svg.export_scene(&Scene::default());

        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let scene = scene_for(vec![Node::process("x = 1")]);

        let mut svg = SvgBuilder::new().with_output_path(&path).build().unwrap();
        svg.export_scene(&scene).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("x = 1"));
    }
}
