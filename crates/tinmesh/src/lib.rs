//! Constrained incremental Delaunay triangulation in the plane.
//!
//! Points are inserted one by one into a synthetic bootstrap triangle, each
//! insertion followed by local edge flips. Optional boundary rings (one
//! exterior, any number of holes) become constrained segments, and everything
//! outside the domain is stripped at the end.
//!
//! Layout
//! - `geom2`: point abstraction, tolerances, predicates, random clouds.
//! - `mesh`: the face arena and the build primitives.
//! - `triangulation`: finished, immutable results and their constructors.
//! - `profile`: stitching cross-section profiles into a TIN.
//! - `api`: curated re-exports and one-call helpers.

pub mod api;
pub mod error;
pub mod geom2;
pub mod mesh;
pub mod profile;
pub mod triangulation;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::TinError;
pub use geom2::{Coord2, MeshCfg};
pub use triangulation::Triangulation;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{triangulate, triangulate_bounded, triangulate_points};
    pub use crate::error::TinError;
    pub use crate::geom2::rand::{draw_points, PointCloudCfg, Region2, ReplayToken};
    pub use crate::geom2::{Coord2, MeshCfg};
    pub use crate::profile::ProfileTriangulator;
    pub use crate::triangulation::Triangulation;
    pub use nalgebra::Vector2 as Vec2;
}
