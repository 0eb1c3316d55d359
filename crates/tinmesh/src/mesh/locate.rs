//! Point location by linear scan.
//!
//! For each face the three side values `cross(e_i, p - start_i)` are computed;
//! the point is in the face iff all are non-negative. Inside a face the point
//! snaps to the edge whose direction best matches `p - start` when the cosine
//! exceeds `MeshCfg::on_edge_cos` and the edge split stays valid.

use nalgebra::Vector2;

use super::types::{Classification, FaceId, MeshStore};
use crate::error::TinError;
use crate::geom2::cross;

impl MeshStore {
    /// First face containing `p`, with its classification.
    pub fn locate(&self, p: Vector2<f64>) -> Result<(FaceId, Classification), TinError> {
        for (i, face) in self.faces.iter().enumerate() {
            let f = FaceId(i);
            let [p0, p1, p2] = self.corners(f);
            let edges = [p2 - p1, p0 - p2, p1 - p0];
            let rel = [p - p1, p - p2, p - p0];
            let side = [
                cross(edges[0], rel[0]),
                cross(edges[1], rel[1]),
                cross(edges[2], rel[2]),
            ];
            if side.iter().any(|&s| s < 0.0) {
                continue;
            }
            if let Some(&v) = face.v.iter().find(|&&v| self.pts[v] == p) {
                return Ok((f, Classification::Vertex(v)));
            }
            let mut best = 0;
            let mut best_cos = f64::NEG_INFINITY;
            for e in 0..3 {
                let c = edges[e].dot(&rel[e])
                    / (edges[e].norm_squared() * rel[e].norm_squared()).sqrt();
                if c > best_cos {
                    best_cos = c;
                    best = e;
                }
            }
            if best_cos > self.cfg.on_edge_cos && self.edge_split_is_safe(f, best, p, side[best])? {
                return Ok((f, Classification::OnEdge(best)));
            }
            return Ok((f, Classification::Inside));
        }
        Err(TinError::PointOutside { x: p.x, y: p.y })
    }

    /// Whether splitting edge `e` of `f` at `p` keeps every piece non-inverted.
    ///
    /// Hull edges and segments only accept points exactly on them: a hull split
    /// would leave the sliver between edge and point uncovered, a segment split
    /// would bend the boundary. Otherwise `p` must stay inside the wedge at the
    /// neighbor's apex.
    fn edge_split_is_safe(
        &self,
        f: FaceId,
        e: usize,
        p: Vector2<f64>,
        side: f64,
    ) -> Result<bool, TinError> {
        let face = self.face(f);
        let Some(n) = face.adj[e] else {
            return Ok(side == 0.0);
        };
        if face.seg[e] && side != 0.0 {
            return Ok(false);
        }
        let (x, y) = face.edge(e);
        let ne = self.edge_towards(n, f)?;
        let w = self.pts[self.face(n).v[ne]];
        let d = p - w;
        Ok(cross(d, self.pts[x] - w) > 0.0 && cross(self.pts[y] - w, d) > 0.0)
    }
}
