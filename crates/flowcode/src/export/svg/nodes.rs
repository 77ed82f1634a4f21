//! SVG rendering for node shapes.

use svg::{self, node::element as svg_element};

use flowcode_core::{
    flow::NodeKind,
    geometry::{Bounds, Point},
    scene::LayoutBox,
};

use super::Svg;

/// Horizontal slant of input/output parallelograms.
const IO_SKEW: f32 = 15.0;
const PROCESS_CORNER_RADIUS: f32 = 4.0;
const FONT_SIZE: f32 = 13.0;
const LINE_HEIGHT: f32 = 16.0;
/// Rough advance of one character at [`FONT_SIZE`].
const CHAR_WIDTH: f32 = 7.0;
const FONT_FAMILY: &str = "Segoe UI, Helvetica, Arial, sans-serif";

impl Svg {
    pub(super) fn render_box(&self, layout_box: &LayoutBox) -> svg_element::Group {
        let kind = layout_box.kind();
        let shape: Box<dyn svg::Node> = match kind {
            NodeKind::Process => {
                Box::new(self.rectangle(layout_box.bounds(), PROCESS_CORNER_RADIUS))
            }
            NodeKind::Start | NodeKind::End => {
                Box::new(self.rectangle(layout_box.bounds(), layout_box.height() / 2.0))
            }
            NodeKind::Io => Box::new(self.parallelogram(layout_box.bounds())),
            NodeKind::If | NodeKind::Loop => Box::new(self.diamond(layout_box.occupied_bounds())),
        };

        // Text inside a diamond must fit the inscribed square's middle band.
        let text_width = if kind.is_decision() {
            layout_box.width() * 0.8
        } else {
            layout_box.width() - 2.0 * IO_SKEW
        };

        let group = svg_element::Group::new()
            .set("class", format!("node node-{kind}"))
            .add(shape);
        self.render_label_lines(layout_box.center(), layout_box.label(), text_width)
            .into_iter()
            .fold(group, |group, line| group.add(line))
    }

    fn rectangle(&self, bounds: Bounds, corner_radius: f32) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", corner_radius)
            .set("fill", self.palette.fill.to_string())
            .set("stroke", self.palette.stroke.to_string())
            .set("stroke-width", 2)
    }

    fn parallelogram(&self, bounds: Bounds) -> svg_element::Polygon {
        let corners = [
            Point::new(bounds.min_x() + IO_SKEW, bounds.min_y()),
            Point::new(bounds.max_x(), bounds.min_y()),
            Point::new(bounds.max_x() - IO_SKEW, bounds.max_y()),
            Point::new(bounds.min_x(), bounds.max_y()),
        ];
        self.polygon(&corners)
    }

    fn diamond(&self, footprint: Bounds) -> svg_element::Polygon {
        let center = footprint.center();
        let corners = [
            Point::new(center.x(), footprint.min_y()),
            Point::new(footprint.max_x(), center.y()),
            Point::new(center.x(), footprint.max_y()),
            Point::new(footprint.min_x(), center.y()),
        ];
        self.polygon(&corners)
    }

    fn polygon(&self, corners: &[Point]) -> svg_element::Polygon {
        let points = corners
            .iter()
            .map(|p| format!("{},{}", p.x(), p.y()))
            .collect::<Vec<_>>()
            .join(" ");

        svg_element::Polygon::new()
            .set("points", points)
            .set("fill", self.palette.fill.to_string())
            .set("stroke", self.palette.stroke.to_string())
            .set("stroke-width", 2)
    }

    /// One `text` element per wrapped line, vertically centered on `center`.
    fn render_label_lines(
        &self,
        center: Point,
        label: &str,
        max_width: f32,
    ) -> Vec<svg_element::Text> {
        let max_chars = (max_width / CHAR_WIDTH).floor().max(1.0) as usize;
        let lines = wrap_label(label, max_chars);
        let first_y = center.y() - (lines.len() as f32 - 1.0) * LINE_HEIGHT / 2.0;

        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                svg_element::Text::new(line)
                    .set("x", center.x())
                    .set("y", first_y + i as f32 * LINE_HEIGHT)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", FONT_SIZE)
                    .set("fill", self.palette.stroke.to_string())
            })
            .collect()
    }
}

/// Greedy word wrap. Words longer than `max_chars` stay on a line of their own.
fn wrap_label(label: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in label.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_label() {
        assert_eq!(wrap_label("x = 1", 20), ["x = 1"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_label("total = total + values[i]", 14),
            ["total = total", "+ values[i]"]
        );
    }

    #[test]
    fn test_wrap_keeps_long_word() {
        assert_eq!(
            wrap_label("a extraordinarily_long_identifier", 10),
            ["a", "extraordinarily_long_identifier"]
        );
    }

    #[test]
    fn test_wrap_empty_label() {
        assert_eq!(wrap_label("", 10), [""]);
    }
}
