//! Laid-out flowchart output: positioned boxes and routed edges.
//!
//! A [`Scene`] is what the layout engine produces and what exporters
//! consume. It holds one [`LayoutBox`] per flow node, in depth-first order,
//! and the [`Edge`]s connecting them.

use crate::{
    flow::NodeKind,
    geometry::{Bounds, Point, Size},
};

/// A positioned node shape.
///
/// `center_x`, `top_y`, `width` and `height` describe the nominal box. The
/// `footprint` is the area the shape really occupies on screen, which is
/// larger than the nominal box for decisions because they are drawn as
/// rotated squares. The footprint is centered on the nominal box.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    kind: NodeKind,
    label: String,
    center_x: f32,
    top_y: f32,
    size: Size,
    footprint: Size,
}

impl LayoutBox {
    pub fn new(
        kind: NodeKind,
        label: impl Into<String>,
        center_x: f32,
        top_y: f32,
        size: Size,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            center_x,
            top_y,
            size,
            footprint: size,
        }
    }

    /// Sets the occupied footprint, when it differs from the nominal size.
    pub fn with_footprint(mut self, footprint: Size) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    pub fn top_y(&self) -> f32 {
        self.top_y
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn footprint(&self) -> Size {
        self.footprint
    }

    /// Center of the nominal box.
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.top_y + self.size.height() / 2.0)
    }

    /// Nominal box bounds.
    pub fn bounds(&self) -> Bounds {
        self.center().to_bounds(self.size)
    }

    /// Bounds of the area the shape occupies on screen.
    pub fn occupied_bounds(&self) -> Bounds {
        self.center().to_bounds(self.footprint)
    }

    /// Returns the same box moved horizontally by `dx`.
    pub fn shifted(mut self, dx: f32) -> Self {
        self.center_x += dx;
        self
    }
}

/// Line style of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
}

/// The role an edge plays in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Plain flow from one node to the next in a sequence.
    Sequence,
    /// From a decision down into its true branch or loop body.
    TrueArm,
    /// From an `if` diamond's right vertex into its false branch.
    FalseArm,
    /// From the end of an `if` arm to the merge point.
    Merge,
    /// From the end of a loop body back into the loop condition.
    LoopBack,
    /// From a loop diamond's right vertex around the body to the exit point.
    LoopExit,
}

/// A routed orthogonal connector.
///
/// The polyline is `from`, each waypoint in order, then `to`. The arrow head
/// sits at `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    kind: EdgeKind,
    from: Point,
    to: Point,
    waypoints: Vec<Point>,
    label: Option<String>,
    style: EdgeStyle,
}

impl Edge {
    pub fn new(kind: EdgeKind, from: Point, to: Point, waypoints: Vec<Point>) -> Self {
        Self {
            kind,
            from,
            to,
            waypoints,
            label: None,
            style: EdgeStyle::Solid,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }

    pub fn is_dashed(&self) -> bool {
        self.style == EdgeStyle::Dashed
    }

    /// All polyline vertices, endpoints included.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.from)
            .chain(self.waypoints.iter().copied())
            .chain(std::iter::once(self.to))
    }

    /// Returns `true` when every segment is horizontal or vertical.
    pub fn is_orthogonal(&self) -> bool {
        let points: Vec<Point> = self.points().collect();
        points
            .windows(2)
            .all(|pair| pair[0].x() == pair[1].x() || pair[0].y() == pair[1].y())
    }

    pub fn bounds(&self) -> Bounds {
        self.points()
            .fold(Bounds::from_point(self.from), |bounds, point| bounds.include_point(point))
    }

    /// Returns the same edge moved horizontally by `dx`.
    pub fn shifted(self, dx: f32) -> Self {
        let offset = Point::new(dx, 0.0);
        Self {
            from: self.from.add_point(offset),
            to: self.to.add_point(offset),
            waypoints: self
                .waypoints
                .into_iter()
                .map(|point| point.add_point(offset))
                .collect(),
            ..self
        }
    }
}

/// A complete laid-out flowchart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    boxes: Vec<LayoutBox>,
    edges: Vec<Edge>,
    end_y: f32,
}

impl Scene {
    pub fn new(boxes: Vec<LayoutBox>, edges: Vec<Edge>, end_y: f32) -> Self {
        Self {
            boxes,
            edges,
            end_y,
        }
    }

    /// Boxes in depth-first traversal order.
    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// First free vertical coordinate below the whole chart.
    pub fn end_y(&self) -> f32 {
        self.end_y
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The extent covered by all box footprints and all edge points.
    ///
    /// Returns `None` for an empty scene.
    pub fn bounds(&self) -> Option<Bounds> {
        let boxes = self.boxes.iter().map(LayoutBox::occupied_bounds);
        let edges = self.edges.iter().map(Edge::bounds);
        boxes.chain(edges).reduce(|acc, bounds| acc.merge(&bounds))
    }
}
