//! Point insertion: triangle split (1 → 3) and edge split (2 → 4, or 1 → 2 on
//! the hull). Legalization runs right after on every touched face.

use nalgebra::Vector2;

use super::types::{Classification, Face, FaceId, MeshStore};
use crate::error::TinError;

impl MeshStore {
    /// Insert `p` and restore the Delaunay property around it.
    ///
    /// Returns the vertex index that now represents `p`. A point equal to an
    /// existing vertex still gets its own (unconnected) slot, but the existing
    /// vertex index is returned.
    pub fn insert(&mut self, p: Vector2<f64>) -> Result<usize, TinError> {
        let (f, class) = self.locate(p)?;
        let id = self.reserve_vertex(p);
        let touched = match class {
            Classification::Vertex(v) => {
                self.stats.coincident += 1;
                tracing::warn!(x = p.x, y = p.y, vertex = v, "coincident point ignored");
                return Ok(v);
            }
            Classification::Inside => self.split_triangle(f, id)?,
            Classification::OnEdge(e) => {
                self.stats.edge_splits += 1;
                self.split_edge(f, e, id)?
            }
        };
        self.stats.inserted += 1;
        self.legalize(&touched)?;
        Ok(id)
    }

    /// Split `f = (v0, v1, v2)` at vertex `p` into `(v0, p, v2)`, `(v0, v1, p)`
    /// and `(v1, v2, p)`.
    pub(crate) fn split_triangle(&mut self, f: FaceId, p: usize) -> Result<Vec<FaceId>, TinError> {
        let Face { v, adj, seg } = *self.face(f);
        let a = self.reserve_faces(2);
        let b = FaceId(a.0 + 1);
        if let Some(n0) = adj[0] {
            self.replace_neighbor(n0, f, b)?;
        }
        if let Some(n2) = adj[2] {
            self.replace_neighbor(n2, f, a)?;
        }
        *self.face_mut(f) = Face::new(
            [v[0], p, v[2]],
            [Some(b), adj[1], Some(a)],
            [false, seg[1], false],
        );
        self.faces.push(Face::new(
            [v[0], v[1], p],
            [Some(b), Some(f), adj[2]],
            [false, false, seg[2]],
        ));
        self.faces.push(Face::new(
            [v[1], v[2], p],
            [Some(f), Some(a), adj[0]],
            [false, false, seg[0]],
        ));
        Ok(vec![f, a, b])
    }

    /// Split edge `e` of `f` at vertex `p`, and the neighbor across it if any.
    ///
    /// With `f = (A, X, Y)` where `e` joins `X` and `Y`, `f` becomes `(A, P, Y)`
    /// and a new face `(A, X, P)` is added. A neighbor `(Y, X, W)` becomes
    /// `(Y, P, W)` and a new face `(X, W, P)` is added. A segment flag on the
    /// split edge carries over to both halves.
    pub(crate) fn split_edge(
        &mut self,
        f: FaceId,
        e: usize,
        p: usize,
    ) -> Result<Vec<FaceId>, TinError> {
        let (e1, e2) = ((e + 1) % 3, (e + 2) % 3);
        let face = *self.face(f);
        let (apex, x) = (face.v[e], face.v[e1]);
        let across = face.adj[e];
        let before = face.adj[e2];
        let (seg_split, seg_ax) = (face.seg[e], face.seg[e2]);

        let nb = match across {
            Some(n) => Some((n, self.edge_towards(n, f)?)),
            None => None,
        };
        let a = self.reserve_faces(if nb.is_some() { 2 } else { 1 });
        let b = FaceId(a.0 + 1);

        if let Some(nf) = before {
            self.replace_neighbor(nf, f, a)?;
        }
        {
            let fm = self.face_mut(f);
            fm.v[e1] = p;
            fm.adj[e2] = Some(a);
            fm.seg[e2] = false;
        }
        self.faces.push(Face::new(
            [apex, x, p],
            [nb.map(|_| b), Some(f), before],
            [seg_split, false, seg_ax],
        ));
        let Some((n, ne)) = nb else {
            return Ok(vec![f, a]);
        };

        let (m1, m2) = ((ne + 1) % 3, (ne + 2) % 3);
        let nface = *self.face(n);
        let w = nface.v[ne];
        let after = nface.adj[m1];
        let (nseg, seg_xw) = (nface.seg[ne], nface.seg[m1]);
        if let Some(nn) = after {
            self.replace_neighbor(nn, n, b)?;
        }
        {
            let nm = self.face_mut(n);
            nm.v[m2] = p;
            nm.adj[m1] = Some(b);
            nm.seg[m1] = false;
        }
        self.faces.push(Face::new(
            [x, w, p],
            [Some(n), Some(a), after],
            [false, nseg, seg_xw],
        ));
        Ok(vec![f, a, n, b])
    }
}
