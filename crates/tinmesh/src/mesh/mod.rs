//! Incremental constrained Delaunay mesh.
//!
//! Purpose
//! - Own the face arena (`MeshStore`) and implement the build pipeline:
//!   locate, insert (triangle/edge split), legalize, recover boundary
//!   segments, remove the exterior and compact.
//!
//! Layout
//! - `types.rs` (arena, ids, classification), `locate.rs`, `insert.rs`,
//!   `legalize.rs`, `boundary.rs`, `exterior.rs`. All mutation goes through
//!   `MeshStore` methods; repairs use explicit stacks, never recursion.

mod boundary;
mod exterior;
mod insert;
mod legalize;
mod locate;
mod types;

pub use boundary::check_boundary;
pub use types::{BuildStats, Classification, Face, FaceId, MeshStore, BOOTSTRAP_VERTICES};

#[cfg(test)]
mod tests;
