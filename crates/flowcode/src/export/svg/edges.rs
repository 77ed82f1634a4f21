//! SVG rendering for connectors, their labels and arrow markers.

use svg::node::element as svg_element;

use flowcode_core::{
    color::Color,
    geometry::Point,
    scene::{Edge, EdgeStyle},
};

use super::Svg;

const LABEL_FONT_SIZE: f32 = 11.0;
const LABEL_COLOR: &str = "#444";
const LABEL_CHAR_WIDTH: f32 = 7.0;
const LABEL_HEIGHT: f32 = 16.0;

impl Svg {
    pub(super) fn render_edge(&self, edge: &Edge) -> svg_element::Path {
        let color = self.edge_color(edge);
        let path = svg_element::Path::new()
            .set("d", path_data(edge))
            .set("class", "edge")
            .set("fill", "none")
            .set("stroke", color.to_string())
            .set("stroke-width", 2)
            .set("marker-end", format!("url(#{})", marker_id(color)));

        match edge.style() {
            EdgeStyle::Solid => path,
            EdgeStyle::Dashed => path.set("stroke-dasharray", "5,5"),
        }
    }

    /// The edge's label over an opaque background, next to its first segment.
    pub(super) fn render_edge_label(&self, edge: &Edge) -> Option<svg_element::Group> {
        let label = edge.label()?;
        let anchor = label_anchor(edge, label);
        let width = label.chars().count() as f32 * LABEL_CHAR_WIDTH;

        let background = svg_element::Rectangle::new()
            .set("x", anchor.x() - 2.0)
            .set("y", anchor.y() - LABEL_HEIGHT + 6.0)
            .set("width", width)
            .set("height", LABEL_HEIGHT)
            .set("fill", self.palette.background.to_string())
            .set("opacity", 0.8);
        let text = svg_element::Text::new(label)
            .set("x", anchor.x())
            .set("y", anchor.y())
            .set("font-size", LABEL_FONT_SIZE)
            .set("font-weight", "bold")
            .set("fill", LABEL_COLOR);

        Some(
            svg_element::Group::new()
                .set("class", "edge-label")
                .add(background)
                .add(text),
        )
    }

    /// One arrow head marker per distinct edge color.
    pub(super) fn marker_definitions(&self) -> svg_element::Definitions {
        let mut colors = vec![self.palette.stroke];
        if self.palette.back_edge != self.palette.stroke {
            colors.push(self.palette.back_edge);
        }

        colors
            .into_iter()
            .fold(svg_element::Definitions::new(), |defs, color| {
                defs.add(arrow_head(color))
            })
    }

    fn edge_color(&self, edge: &Edge) -> Color {
        match edge.style() {
            EdgeStyle::Solid => self.palette.stroke,
            EdgeStyle::Dashed => self.palette.back_edge,
        }
    }
}

fn marker_id(color: Color) -> String {
    format!("arrowhead-{}", color.to_id_safe_string())
}

fn arrow_head(color: Color) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", marker_id(color))
        .set("markerWidth", 10)
        .set("markerHeight", 7)
        .set("refX", 9)
        .set("refY", 3.5)
        .set("orient", "auto")
        .add(
            svg_element::Polygon::new()
                .set("points", "0 0, 10 3.5, 0 7")
                .set("fill", color.to_string()),
        )
}

fn path_data(edge: &Edge) -> String {
    let mut points = edge.points();
    let mut data = match points.next() {
        Some(start) => format!("M {} {}", start.x(), start.y()),
        None => return String::new(),
    };
    for point in points {
        data.push_str(&format!(" L {} {}", point.x(), point.y()));
    }
    data
}

/// Baseline start of a label: just below the start of a vertical first
/// segment, or just beside the start of a horizontal one.
fn label_anchor(edge: &Edge, label: &str) -> Point {
    let from = edge.from();
    let next = edge.points().nth(1).unwrap_or_else(|| edge.to());

    if from.is_vertically_aligned(next) {
        Point::new(from.x() + 5.0, from.y() + 20.0)
    } else if next.x() >= from.x() {
        Point::new(from.x() + 15.0, from.y() + 2.0)
    } else {
        let width = label.chars().count() as f32 * LABEL_CHAR_WIDTH;
        Point::new(from.x() - 15.0 - width, from.y() + 2.0)
    }
}
