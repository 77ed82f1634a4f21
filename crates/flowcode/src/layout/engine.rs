//! Column layout of flow trees.
//!
//! Sequences stack top to bottom in a single column. A decision places its
//! diamond in the column, lays out its true branch (or loop body) below it in
//! the same column and, for `if`, its false branch in a column to the right.
//! Every recursive call returns a [`Placement`], so positions flow through
//! return values only.

use log::{debug, info, trace};

use flowcode_core::{
    flow::{Node, NodeKind, Program},
    geometry::{Bounds, Point, Size},
    scene::{EdgeKind, LayoutBox, Scene},
};

use super::{LayoutError, placement::Placement, routing};
use crate::config::LayoutConfig;

/// Lays out flow trees as column-based flowcharts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out a whole program at the configured origin.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TooDeep`] when the tree nests deeper than
    /// [`LayoutConfig::max_depth`]. No partial scene is produced.
    pub fn layout(&self, program: &Program) -> Result<Scene, LayoutError> {
        info!(root_nodes = program.nodes().len(); "Laying out program");

        let placement = self.layout_block(
            program.nodes(),
            self.config.origin_x(),
            self.config.origin_y(),
            0,
        )?;

        debug!(
            boxes_count = placement.boxes().len(),
            edges_count = placement.edges().len(),
            end_y = placement.end_y();
            "Layout calculated",
        );
        Ok(placement.into_scene())
    }

    /// Lays out one sequence in the column `column_x`, starting at `start_y`.
    ///
    /// The returned placement's `end_y` is the first free vertical position
    /// below the sequence; it equals `start_y` for an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TooDeep`] when `depth` or any nested sequence
    /// exceeds the configured maximum depth.
    pub fn layout_block(
        &self,
        nodes: &[Node],
        column_x: f32,
        start_y: f32,
        depth: usize,
    ) -> Result<Placement, LayoutError> {
        if depth > self.config.max_depth() {
            return Err(LayoutError::TooDeep {
                max_depth: self.config.max_depth(),
            });
        }

        let mut placement = Placement::empty(start_y);
        let mut cur_y = start_y;
        // Bottom of the previous simple box. Decisions draw their own
        // connector into the next position, so they leave this unset.
        let mut previous_bottom: Option<f32> = None;

        for node in nodes {
            if let Some(bottom) = previous_bottom {
                placement.push_edge(routing::route(
                    EdgeKind::Sequence,
                    Point::new(column_x, bottom),
                    Point::new(column_x, cur_y),
                ));
            }

            let top_y = cur_y;
            match node {
                Node::If {
                    condition,
                    true_branch,
                    false_branch,
                } => {
                    let part = self.place_if(
                        condition,
                        true_branch,
                        false_branch,
                        column_x,
                        cur_y,
                        depth,
                    )?;
                    cur_y = part.end_y();
                    placement.append(part);
                    previous_bottom = None;
                }
                Node::Loop { condition, body } => {
                    let part = self.place_loop(condition, body, column_x, cur_y, depth)?;
                    cur_y = part.end_y();
                    placement.append(part);
                    previous_bottom = None;
                }
                Node::Start { .. } | Node::End { .. } | Node::Process { .. } | Node::Io { .. } => {
                    placement.push_box(LayoutBox::new(
                        node.kind(),
                        node.label(),
                        column_x,
                        cur_y,
                        Size::new(self.config.node_width(), self.config.node_height()),
                    ));
                    previous_bottom = Some(cur_y + self.config.node_height());
                    cur_y += self.config.node_height() + self.config.vertical_gap();
                }
            }

            trace!(kind = node.kind().as_str(), column_x, top_y, next_y = cur_y; "Placed node");
        }

        placement.set_end_y(cur_y);
        Ok(placement)
    }

    /// The diamond box for a decision whose footprint starts at `top_y`.
    fn decision_box(
        &self,
        kind: NodeKind,
        condition: &str,
        column_x: f32,
        top_y: f32,
    ) -> LayoutBox {
        let size = self.config.decision_size();
        let inset = (self.config.decision_height() - size) / 2.0;
        let footprint = Size::new(
            2.0 * self.config.decision_half_width(),
            self.config.decision_height(),
        );
        LayoutBox::new(kind, condition, column_x, top_y + inset, Size::new(size, size))
            .with_footprint(footprint)
    }

    fn place_if(
        &self,
        condition: &str,
        true_branch: &[Node],
        false_branch: &[Node],
        column_x: f32,
        top_y: f32,
        depth: usize,
    ) -> Result<Placement, LayoutError> {
        let gap = self.config.vertical_gap();
        let mut placement = Placement::empty(top_y);

        let diamond = self.decision_box(NodeKind::If, condition, column_x, top_y);
        let diamond_bounds = diamond.occupied_bounds();
        placement.push_box(diamond);

        let mid_y = top_y + self.config.decision_height() / 2.0;
        let true_start = top_y + self.config.decision_height();
        let branch_top = true_start + gap;

        placement.push_edge(routing::true_arm(column_x, true_start, branch_top));
        let true_part = self.layout_block(true_branch, column_x, branch_top, depth + 1)?;

        let initial_false_x = column_x + self.config.horizontal_gap();
        let false_part = self.layout_block(false_branch, initial_false_x, branch_top, depth + 1)?;
        let shift = self.false_column_shift(diamond_bounds, &true_part, &false_part);
        let false_x = initial_false_x + shift;
        let false_part = false_part.shifted(shift);

        let right_vertex = Point::new(column_x + self.config.decision_half_width(), mid_y);
        placement.push_edge(routing::false_arm(right_vertex, false_x, branch_top));

        let true_end = true_part.end_y();
        let false_end = false_part.end_y();
        let merge_y = true_end.max(false_end) + gap;

        // An empty branch connects from where its arm arrived.
        let true_connect = if true_branch.is_empty() {
            branch_top
        } else {
            true_end - gap
        };
        let false_connect = if false_branch.is_empty() {
            branch_top
        } else {
            false_end - gap
        };

        placement.append(true_part);
        placement.push_edge(routing::route(
            EdgeKind::Merge,
            Point::new(column_x, true_connect),
            Point::new(column_x, merge_y),
        ));
        placement.append(false_part);
        placement.push_edge(routing::false_merge(
            false_x,
            false_connect,
            column_x,
            merge_y,
        ));

        trace!(condition, merge_y, false_x, shift; "Placed if");
        placement.set_end_y(merge_y);
        Ok(placement)
    }

    /// How far the false branch must move right to keep `lane_clearance`
    /// between it and everything left of it.
    fn false_column_shift(
        &self,
        diamond: Bounds,
        true_part: &Placement,
        false_part: &Placement,
    ) -> f32 {
        let Some(false_bounds) = false_part.bounds() else {
            return 0.0;
        };
        let left_extent = true_part
            .bounds()
            .map_or(diamond.max_x(), |bounds| bounds.max_x().max(diamond.max_x()));

        (left_extent + self.config.lane_clearance() - false_bounds.min_x()).max(0.0)
    }

    fn place_loop(
        &self,
        condition: &str,
        body: &[Node],
        column_x: f32,
        top_y: f32,
        depth: usize,
    ) -> Result<Placement, LayoutError> {
        let gap = self.config.vertical_gap();
        let half_width = self.config.decision_half_width();
        let mut placement = Placement::empty(top_y);

        placement.push_box(self.decision_box(NodeKind::Loop, condition, column_x, top_y));

        let mid_y = top_y + self.config.decision_height() / 2.0;
        let body_start = top_y + self.config.decision_height();
        let body_top = body_start + gap;

        placement.push_edge(routing::true_arm(column_x, body_start, body_top));
        let body_part = self.layout_block(body, column_x, body_top, depth + 1)?;

        let body_end = body_part.end_y();
        let body_connect = if body.is_empty() {
            body_top
        } else {
            body_end - gap
        };
        let exit_y = body_end + gap;
        let (return_lane, exit_lane) = self.loop_lanes(column_x, &body_part);

        placement.append(body_part);
        placement.push_edge(routing::loop_back(
            Point::new(column_x, body_connect),
            return_lane,
            Point::new(column_x - half_width, mid_y),
        ));
        placement.push_edge(routing::loop_exit(
            Point::new(column_x + half_width, mid_y),
            exit_lane,
            column_x,
            exit_y,
        ));

        trace!(condition, exit_y, return_lane, exit_lane; "Placed loop");
        placement.set_end_y(exit_y);
        Ok(placement)
    }

    /// Horizontal positions of a loop's return and exit lanes, pushed
    /// outward past anything the body occupies.
    fn loop_lanes(&self, column_x: f32, body: &Placement) -> (f32, f32) {
        let return_lane = column_x - self.config.loop_return_offset();
        let exit_lane = column_x + self.config.loop_exit_offset();

        match body.bounds() {
            Some(bounds) => (
                return_lane.min(bounds.min_x() - self.config.lane_clearance()),
                exit_lane.max(bounds.max_x() + self.config.lane_clearance()),
            ),
            None => (return_lane, exit_lane),
        }
    }
}
