//! Basic 2D types and tolerances used by the mesh.
//!
//! - `Coord2`: anything with planar x/y accessors (z is ignored for 3D inputs).
//! - `MeshCfg`: centralizes thresholds for on-edge snapping, degeneracy and
//!   segment recovery.
//! - `Circle`: circumcircle value returned by `predicates::circumcircle`.

use nalgebra::{Point2, Point3, Vector2, Vector3};

/// Planar coordinate access.
///
/// Implemented for the nalgebra vector/point types, plain arrays and tuples.
/// 3D types are projected onto the xy-plane.
pub trait Coord2 {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    #[inline]
    fn to_vec2(&self) -> Vector2<f64> {
        Vector2::new(self.x(), self.y())
    }
}

impl Coord2 for Vector2<f64> {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
    #[inline]
    fn to_vec2(&self) -> Vector2<f64> {
        *self
    }
}

impl Coord2 for Point2<f64> {
    #[inline]
    fn x(&self) -> f64 {
        self.coords[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self.coords[1]
    }
}

impl Coord2 for Vector3<f64> {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Coord2 for Point3<f64> {
    #[inline]
    fn x(&self) -> f64 {
        self.coords[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self.coords[1]
    }
}

impl Coord2 for [f64; 2] {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Coord2 for [f64; 3] {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Coord2 for (f64, f64) {
    #[inline]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline]
    fn y(&self) -> f64 {
        self.1
    }
}

/// Mesh configuration (tolerances and sizing).
#[derive(Clone, Copy, Debug)]
pub struct MeshCfg {
    /// Cosine above which a point inside a face snaps onto one of its edges (cos 3°).
    pub on_edge_cos: f64,
    /// Relative threshold for a vanishing circumcircle denominator.
    pub eps_det: f64,
    /// Relative threshold for "vertex lies on a boundary segment" during recovery.
    pub collinear_eps: f64,
    /// Maximum number of nested midpoint subdivisions per boundary edge.
    pub max_subdivision_depth: usize,
    /// Bootstrap corners sit at this multiple of `bound()`.
    pub bootstrap_scale: f64,
    /// Initial vertex capacity; face capacity is twice that.
    pub initial_capacity: usize,
}

impl Default for MeshCfg {
    fn default() -> Self {
        Self {
            on_edge_cos: 0.998_629_53,
            eps_det: 1e-12,
            collinear_eps: 1e-12,
            max_subdivision_depth: 48,
            bootstrap_scale: 3.0,
            initial_capacity: 1000,
        }
    }
}

/// Circle given by center and squared radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius_sq: f64,
}

impl Circle {
    /// Strict containment: points on the circle are outside.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        (p - self.center).norm_squared() < self.radius_sq
    }
}
