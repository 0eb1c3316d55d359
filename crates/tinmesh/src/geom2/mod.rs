//! Planar geometry used by the mesh.
//!
//! Purpose
//! - One point abstraction (`Coord2`) so flat coordinate arrays, nalgebra
//!   points and 2.5D terrain points all feed the same engine.
//! - Explicit tolerances (`MeshCfg`) and value-returning predicates: the
//!   circumcircle comes back as a `Circle`, not through scratch fields.

pub mod predicates;
pub mod rand;
mod types;

pub use predicates::{
    circumcircle, cross, in_circle, inside_ring, interior_point, orient, segments_cross,
};
pub use types::{Circle, Coord2, MeshCfg};

#[cfg(test)]
mod tests;
