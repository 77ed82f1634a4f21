//! Orthogonal connector construction.
//!
//! All connectors consist of horizontal and vertical segments only. The
//! generic [`route`] primitive covers plain two-point connections; the other
//! functions build the fixed-shape connectors around decisions.

use flowcode_core::{
    geometry::Point,
    scene::{Edge, EdgeKind, EdgeStyle},
};

pub const TRUE_LABEL: &str = "True";
pub const FALSE_LABEL: &str = "False";

/// Connects two points with a single vertical segment when they share a
/// column, otherwise vertical, horizontal at the midpoint height, vertical.
pub fn route(kind: EdgeKind, from: Point, to: Point) -> Edge {
    if from.is_vertically_aligned(to) {
        return Edge::new(kind, from, to, Vec::new());
    }

    let mid_y = from.midpoint(to).y();
    Edge::new(
        kind,
        from,
        to,
        vec![from.with_y(mid_y), to.with_y(mid_y)],
    )
}

/// Straight down from a decision's footprint into its true branch or body.
pub fn true_arm(column_x: f32, from_y: f32, to_y: f32) -> Edge {
    route(
        EdgeKind::TrueArm,
        Point::new(column_x, from_y),
        Point::new(column_x, to_y),
    )
    .with_label(TRUE_LABEL)
}

/// From a decision's right vertex across to the false column, then down to
/// the top of the false branch.
pub fn false_arm(right_vertex: Point, false_x: f32, branch_top: f32) -> Edge {
    Edge::new(
        EdgeKind::FalseArm,
        right_vertex,
        Point::new(false_x, branch_top),
        vec![right_vertex.with_x(false_x)],
    )
    .with_label(FALSE_LABEL)
}

/// From the end of the false branch down to the merge height, then left
/// into the main column.
pub fn false_merge(false_x: f32, connect_y: f32, column_x: f32, merge_y: f32) -> Edge {
    Edge::new(
        EdgeKind::Merge,
        Point::new(false_x, connect_y),
        Point::new(column_x, merge_y),
        vec![Point::new(false_x, merge_y)],
    )
}

/// Dashed return from the end of a loop body, left to the return lane, up
/// to the diamond's mid height, then right into its left vertex.
pub fn loop_back(from: Point, lane_x: f32, left_vertex: Point) -> Edge {
    Edge::new(
        EdgeKind::LoopBack,
        from,
        left_vertex,
        vec![from.with_x(lane_x), left_vertex.with_x(lane_x)],
    )
    .with_style(EdgeStyle::Dashed)
}

/// From a loop diamond's right vertex out to the exit lane, down below the
/// body, then left into the main column at `exit_y`.
pub fn loop_exit(right_vertex: Point, lane_x: f32, column_x: f32, exit_y: f32) -> Edge {
    Edge::new(
        EdgeKind::LoopExit,
        right_vertex,
        Point::new(column_x, exit_y),
        vec![right_vertex.with_x(lane_x), Point::new(lane_x, exit_y)],
    )
    .with_label(FALSE_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_same_column_is_single_segment() {
        let edge = route(
            EdgeKind::Sequence,
            Point::new(400.0, 110.0),
            Point::new(400.0, 230.0),
        );

        assert!(edge.waypoints().is_empty());
        assert!(edge.is_orthogonal());
    }

    #[test]
    fn test_route_bends_at_midpoint() {
        let edge = route(
            EdgeKind::Sequence,
            Point::new(100.0, 0.0),
            Point::new(300.0, 100.0),
        );

        assert_eq!(
            edge.waypoints(),
            [Point::new(100.0, 50.0), Point::new(300.0, 50.0)]
        );
        assert!(edge.is_orthogonal());
    }

    #[test]
    fn test_decision_connectors_are_orthogonal() {
        let vertex = Point::new(513.0, 163.0);
        let edges = [
            true_arm(400.0, 276.0, 396.0),
            false_arm(vertex, 740.0, 396.0),
            false_merge(740.0, 456.0, 400.0, 576.0),
            loop_back(Point::new(400.0, 456.0), 260.0, Point::new(287.0, 163.0)),
            loop_exit(vertex, 660.0, 400.0, 576.0),
        ];

        for edge in &edges {
            assert!(edge.is_orthogonal(), "{edge:?}");
        }
        assert_eq!(edges[0].label(), Some(TRUE_LABEL));
        assert_eq!(edges[1].label(), Some(FALSE_LABEL));
        assert_eq!(edges[2].label(), None);
        assert!(edges[3].is_dashed());
        assert_eq!(edges[4].label(), Some(FALSE_LABEL));
    }
}
