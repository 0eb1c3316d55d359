//! Error type shared by every fallible mesh operation.

use thiserror::Error;

/// Errors raised while building or validating a triangulation.
///
/// All variants are fatal for the build that produced them: the algorithm is
/// deterministic, so re-running on the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TinError {
    #[error("point ({x}, {y}) lies in no face of the triangulation")]
    PointOutside { x: f64, y: f64 },
    #[error("boundary edge {edge_a} of ring {ring_a} crosses edge {edge_b} of ring {ring_b}")]
    BoundaryIntersection {
        ring_a: usize,
        edge_a: usize,
        ring_b: usize,
        edge_b: usize,
    },
    #[error("odd coordinate count {len} (ring {ring:?})")]
    OddCoordinateCount { ring: Option<usize>, len: usize },
    #[error("hole ring {inner} lies inside hole ring {outer}")]
    NestedRings { outer: usize, inner: usize },
    #[error("ring {ring} has {vertices} vertices, at least 3 required")]
    BoundaryTooShort { ring: usize, vertices: usize },
    #[error("coordinate {index} is not finite")]
    NonFinite { index: usize },
    #[error("at least 3 points are required")]
    Empty,
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: &'static str },
    #[error("segment recovery exceeded {depth} subdivision levels")]
    SubdivisionLimit { depth: usize },
    #[error("face {face} and neighbor {neighbor} do not point at each other")]
    BrokenAdjacency { face: usize, neighbor: usize },
    #[error("profile has {found} segments, previous profile had {expected}")]
    SegmentCountMismatch { expected: usize, found: usize },
}
