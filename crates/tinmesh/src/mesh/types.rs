//! Face arena and shared mesh types.
//!
//! Faces are fixed-shape records in a growable arena addressed by `FaceId`.
//! Edge `e` of a face is opposite vertex `v[e]` and joins `v[e+1]` and `v[e+2]`
//! (indices mod 3). Faces are counterclockwise.

use nalgebra::Vector2;

use crate::error::TinError;
use crate::geom2::MeshCfg;

/// Face handle (index into the arena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// One triangle: vertex indices plus per-edge neighbor and segment flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub v: [usize; 3],
    pub adj: [Option<FaceId>; 3],
    pub seg: [bool; 3],
}

impl Face {
    #[inline]
    pub fn new(v: [usize; 3], adj: [Option<FaceId>; 3], seg: [bool; 3]) -> Self {
        Self { v, adj, seg }
    }

    /// Endpoints of edge `e` in face order.
    #[inline]
    pub fn edge(&self, e: usize) -> (usize, usize) {
        (self.v[(e + 1) % 3], self.v[(e + 2) % 3])
    }

    #[inline]
    pub fn has_vertex(&self, v: usize) -> bool {
        self.v.contains(&v)
    }
}

/// Where a query point sits relative to the located face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Strictly inside (or treated as such).
    Inside,
    /// On the given edge index of the face.
    OnEdge(usize),
    /// Coincides with an existing vertex.
    Vertex(usize),
}

/// Counters collected during a build (for logs and provenance).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub inserted: usize,
    pub coincident: usize,
    pub edge_splits: usize,
    pub flips: usize,
    pub midpoints: usize,
    pub removed_faces: usize,
}

/// Number of synthetic bootstrap vertices.
pub const BOOTSTRAP_VERTICES: usize = 3;

/// Mutable mesh under construction.
///
/// Vertices `0..3` are the bootstrap corners while `boot` is true.
#[derive(Clone, Debug)]
pub struct MeshStore {
    pub(crate) pts: Vec<Vector2<f64>>,
    pub(crate) faces: Vec<Face>,
    pub(crate) boot: bool,
    pub(crate) bound: f64,
    pub(crate) cfg: MeshCfg,
    pub(crate) stats: BuildStats,
}

impl MeshStore {
    /// Bootstrap triangle `(C,0), (0,C), (-C,-C)` with `C = bootstrap_scale · bound`.
    pub fn new(bound: f64, cfg: MeshCfg) -> Self {
        let c = cfg.bootstrap_scale * bound;
        let cap = cfg.initial_capacity.max(BOOTSTRAP_VERTICES);
        let mut pts = Vec::with_capacity(cap);
        pts.extend([
            Vector2::new(c, 0.0),
            Vector2::new(0.0, c),
            Vector2::new(-c, -c),
        ]);
        let mut faces = Vec::with_capacity(2 * cap);
        faces.push(Face::new([0, 1, 2], [None; 3], [false; 3]));
        tracing::debug!(bound, corner = c, "bootstrap");
        Self {
            pts,
            faces,
            boot: true,
            bound,
            cfg,
            stats: BuildStats::default(),
        }
    }

    /// Append a vertex, doubling capacity when full.
    pub fn reserve_vertex(&mut self, p: Vector2<f64>) -> usize {
        if self.pts.len() == self.pts.capacity() {
            self.pts.reserve(self.pts.len());
        }
        self.pts.push(p);
        self.pts.len() - 1
    }

    /// Make room for `count` more faces; returns the id the first one will get.
    pub fn reserve_faces(&mut self, count: usize) -> FaceId {
        let len = self.faces.len();
        if len + count > self.faces.capacity() {
            self.faces.reserve(len.max(count));
        }
        FaceId(len)
    }

    #[inline]
    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.0]
    }

    #[inline]
    pub fn face_mut(&mut self, f: FaceId) -> &mut Face {
        &mut self.faces[f.0]
    }

    #[inline]
    pub fn point(&self, v: usize) -> Vector2<f64> {
        self.pts[v]
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn is_bootstrap(&self, v: usize) -> bool {
        self.boot && v < BOOTSTRAP_VERTICES
    }

    /// Edge index of `f` whose neighbor is `n`.
    pub fn edge_towards(&self, f: FaceId, n: FaceId) -> Result<usize, TinError> {
        self.face(f)
            .adj
            .iter()
            .position(|&a| a == Some(n))
            .ok_or(TinError::BrokenAdjacency {
                face: f.0,
                neighbor: n.0,
            })
    }

    /// Repoint `f`'s edge that currently faces `old` to `new`.
    pub fn replace_neighbor(&mut self, f: FaceId, old: FaceId, new: FaceId) -> Result<(), TinError> {
        let e = self.edge_towards(f, old)?;
        self.face_mut(f).adj[e] = Some(new);
        Ok(())
    }

    /// Corner coordinates of `f`.
    #[inline]
    pub fn corners(&self, f: FaceId) -> [Vector2<f64>; 3] {
        let v = self.face(f).v;
        [self.pts[v[0]], self.pts[v[1]], self.pts[v[2]]]
    }
}
