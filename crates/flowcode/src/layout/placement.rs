//! Laid-out sequences.

use flowcode_core::{
    geometry::Bounds,
    scene::{Edge, LayoutBox, Scene},
};

/// The boxes and edges of one laid-out sequence, with the first free
/// vertical coordinate below them.
///
/// Every recursive layout call returns its own `Placement`; the caller
/// appends it to its own with [`Placement::append`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    boxes: Vec<LayoutBox>,
    edges: Vec<Edge>,
    end_y: f32,
}

impl Placement {
    /// An empty placement ending where it starts.
    pub fn empty(start_y: f32) -> Self {
        Self {
            boxes: Vec::new(),
            edges: Vec::new(),
            end_y: start_y,
        }
    }

    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// First free vertical coordinate below everything placed.
    pub fn end_y(&self) -> f32 {
        self.end_y
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub(super) fn push_box(&mut self, layout_box: LayoutBox) {
        self.boxes.push(layout_box);
    }

    pub(super) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub(super) fn set_end_y(&mut self, end_y: f32) {
        self.end_y = end_y;
    }

    /// Moves the boxes and edges of `other` into this placement.
    ///
    /// `end_y` is left untouched; the caller decides where to continue.
    pub(super) fn append(&mut self, other: Placement) {
        self.boxes.extend(other.boxes);
        self.edges.extend(other.edges);
    }

    /// Returns the placement moved horizontally by `dx`.
    pub(super) fn shifted(self, dx: f32) -> Self {
        Self {
            boxes: self.boxes.into_iter().map(|b| b.shifted(dx)).collect(),
            edges: self.edges.into_iter().map(|e| e.shifted(dx)).collect(),
            end_y: self.end_y,
        }
    }

    /// The area covered by box footprints and edge points.
    pub fn bounds(&self) -> Option<Bounds> {
        let boxes = self.boxes.iter().map(LayoutBox::occupied_bounds);
        let edges = self.edges.iter().map(Edge::bounds);
        boxes.chain(edges).reduce(|acc, bounds| acc.merge(&bounds))
    }

    pub fn into_scene(self) -> Scene {
        Scene::new(self.boxes, self.edges, self.end_y)
    }
}
