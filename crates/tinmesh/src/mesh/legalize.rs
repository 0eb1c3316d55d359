//! Edge legalization (Lawson flips driven by an explicit stack).
//!
//! Rules
//! - Every edge of every touched face is queued; after a flip all edges of
//!   both faces are queued again.
//! - Real edges use the exact in-circle determinant, so a quad's two
//!   diagonals can never both be illegal and cocircular quads are left alone.
//! - Edges touching bootstrap corners are judged as if the corners sat at
//!   infinity: a diagonal with fewer bootstrap endpoints wins when the quad
//!   is strictly convex, and ties between one-corner diagonals are decided by
//!   the limiting circle, a half-plane.
//!
//! Each flip after an insertion adds an edge at the new vertex, so the flip
//! count per call is bounded by the face count. Exceeding a multiple of it
//! is reported as `DegenerateGeometry`.

use nalgebra::Vector2;

use super::types::{FaceId, MeshStore};
use crate::error::TinError;
use crate::geom2::{circumcircle, cross, in_circle};

impl MeshStore {
    /// Legalize all edges of `faces` and everything disturbed by the flips.
    pub(crate) fn legalize(&mut self, faces: &[FaceId]) -> Result<usize, TinError> {
        let mut stack: Vec<(FaceId, usize)> = faces
            .iter()
            .rev()
            .flat_map(|&f| (0..3).rev().map(move |e| (f, e)))
            .collect();
        let limit = 8 * self.faces.len() + 64;
        let mut flips = 0;
        while let Some((f, e)) = stack.pop() {
            if !self.is_illegal(f, e)? {
                continue;
            }
            if flips == limit {
                return Err(TinError::DegenerateGeometry {
                    reason: "edge flips did not converge",
                });
            }
            let n = self.flip(f, e)?;
            flips += 1;
            stack.extend((0..3).flat_map(|k| [(f, k), (n, k)]));
        }
        self.stats.flips += flips;
        Ok(flips)
    }

    /// Whether edge `e` of `f` should be flipped.
    pub(crate) fn is_illegal(&self, f: FaceId, e: usize) -> Result<bool, TinError> {
        let face = self.face(f);
        let Some(n) = face.adj[e] else {
            return Ok(false);
        };
        if face.seg[e] {
            return Ok(false);
        }
        let ne = self.edge_towards(n, f)?;
        let z = face.v[e];
        let (a, b) = face.edge(e);
        let w = self.face(n).v[ne];

        let boot = |v: usize| usize::from(self.is_bootstrap(v));
        let on_edge = boot(a) + boot(b);
        let on_diagonal = boot(z) + boot(w);
        let [pz, pa, pb, pw] = [z, a, b, w].map(|v| self.pts[v]);
        if on_diagonal > on_edge {
            return Ok(false);
        }
        if !strictly_convex(pz, pa, pw, pb) {
            return Ok(false);
        }
        if on_diagonal < on_edge {
            return Ok(true);
        }
        if on_edge == 0 {
            return Ok(in_circle(pz, pa, pb, pw) > 0.0);
        }
        // One bootstrap corner on each diagonal. The corners are passed in
        // index order so both diagonals see the same direction.
        let (corner_edge, real_edge) = if self.is_bootstrap(a) { (a, b) } else { (b, a) };
        let (corner_diag, real_diag) = if self.is_bootstrap(z) { (z, w) } else { (w, z) };
        let dir = circumcircle(
            Vector2::zeros(),
            self.pts[corner_edge.min(corner_diag)],
            self.pts[corner_edge.max(corner_diag)],
            self.cfg.eps_det,
        )?
        .center;
        Ok((self.pts[real_diag] - self.pts[real_edge]).dot(&dir) > 0.0)
    }

    /// Flip the diagonal shared by `f` and its neighbor across edge `e`.
    ///
    /// `f = (Z, X, Y)` and `n = (W, Y, X)` become `(Z, W, Y)` and `(W, Z, X)`.
    /// Face ids are kept; the returned id is the neighbor.
    pub(crate) fn flip(&mut self, f: FaceId, e: usize) -> Result<FaceId, TinError> {
        let n = self.face(f).adj[e].ok_or(TinError::DegenerateGeometry {
            reason: "flip across a hull edge",
        })?;
        let ne = self.edge_towards(n, f)?;
        let (e1, e2) = ((e + 1) % 3, (e + 2) % 3);
        let (m1, m2) = ((ne + 1) % 3, (ne + 2) % 3);
        let z = self.face(f).v[e];
        let w = self.face(n).v[ne];
        let (outer_n, seg_n) = (self.face(n).adj[m2], self.face(n).seg[m2]);
        let (outer_f, seg_f) = (self.face(f).adj[e2], self.face(f).seg[e2]);
        if let Some(o) = outer_n {
            self.replace_neighbor(o, n, f)?;
        }
        if let Some(o) = outer_f {
            self.replace_neighbor(o, f, n)?;
        }
        {
            let fm = self.face_mut(f);
            fm.v[e1] = w;
            fm.adj[e] = outer_n;
            fm.seg[e] = seg_n;
            fm.adj[e2] = Some(n);
            fm.seg[e2] = false;
        }
        {
            let nm = self.face_mut(n);
            nm.v[m1] = z;
            nm.adj[ne] = outer_f;
            nm.seg[ne] = seg_f;
            nm.adj[m2] = Some(f);
            nm.seg[m2] = false;
        }
        tracing::trace!(face = f.0, neighbor = n.0, "flip");
        Ok(n)
    }
}

/// Quad `z, a, w, b` (CCW) is strictly convex at `a` and `b`, so the diagonal
/// `zw` lies inside it.
#[inline]
fn strictly_convex(z: Vector2<f64>, a: Vector2<f64>, w: Vector2<f64>, b: Vector2<f64>) -> bool {
    cross(a - z, w - a) > 0.0 && cross(b - w, z - b) > 0.0
}
