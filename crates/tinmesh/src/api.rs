//! Curated entry points.
//!
//! The `triangulate*` helpers return only the flat index array; use
//! `Triangulation` directly when points, neighbors or segments are needed.

pub use crate::error::TinError;
pub use crate::geom2::rand::{draw_points, PointCloudCfg, Region2, ReplayToken};
pub use crate::geom2::{Coord2, MeshCfg};
pub use crate::mesh::{BuildStats, FaceId};
pub use crate::profile::ProfileTriangulator;
pub use crate::triangulation::Triangulation;

/// Triangle indices of the unconstrained triangulation of `[x0, y0, x1, y1, ...]`.
pub fn triangulate(coords: &[f64]) -> Result<Vec<usize>, TinError> {
    Ok(Triangulation::build(coords)?.indices())
}

/// Same as [`triangulate`] for point objects.
pub fn triangulate_points<P: Coord2>(points: &[P]) -> Result<Vec<usize>, TinError> {
    Ok(Triangulation::from_points(points)?.indices())
}

/// Triangle indices of the constrained triangulation of `rings` (first is the
/// exterior) plus `extra` interior points.
pub fn triangulate_bounded(rings: &[Vec<f64>], extra: &[f64]) -> Result<Vec<usize>, TinError> {
    Ok(Triangulation::build_bounded(rings, extra)?.indices())
}
