//! Boundary rings: validation, crossing checks and segment recovery.
//!
//! Segment recovery works on a stack of `(from, to, depth)` requests. An
//! existing edge is simply marked. Otherwise the request is split, either at a
//! vertex already lying on the segment or at a freshly inserted midpoint.

use nalgebra::Vector2;

use super::types::{FaceId, MeshStore};
use crate::error::TinError;
use crate::geom2::{cross, inside_ring, segments_cross};

/// Fail on the first pair of boundary edges that properly cross.
///
/// Every ring is checked against itself (adjacent edges skipped) and against
/// every other ring. A hole with a vertex strictly inside another hole is
/// rejected as nested.
pub fn check_boundary(rings: &[Vec<Vector2<f64>>]) -> Result<(), TinError> {
    let edges: Vec<(usize, usize, Vector2<f64>, Vector2<f64>)> = rings
        .iter()
        .enumerate()
        .flat_map(|(r, ring)| {
            let n = ring.len();
            (0..n).map(move |i| (r, i, ring[i], ring[(i + 1) % n]))
        })
        .collect();
    for (k, &(ra, ea, a0, a1)) in edges.iter().enumerate() {
        for &(rb, eb, b0, b1) in &edges[k + 1..] {
            if ra == rb {
                let n = rings[ra].len();
                if eb - ea == 1 || eb - ea == n - 1 {
                    continue;
                }
            }
            if segments_cross(a0, a1, b0, b1) {
                return Err(TinError::BoundaryIntersection {
                    ring_a: ra,
                    edge_a: ea,
                    ring_b: rb,
                    edge_b: eb,
                });
            }
        }
    }
    for (i, outer) in rings.iter().enumerate().skip(1) {
        for (j, inner) in rings.iter().enumerate().skip(1) {
            if i != j && inner.iter().any(|&p| inside_ring(p, outer)) {
                return Err(TinError::NestedRings { outer: i, inner: j });
            }
        }
    }
    Ok(())
}

impl MeshStore {
    /// Face and edge index joining vertices `a` and `b`, if the edge exists.
    pub(crate) fn find_edge(&self, a: usize, b: usize) -> Option<(FaceId, usize)> {
        self.faces.iter().enumerate().find_map(|(i, face)| {
            (0..3)
                .find(|&e| {
                    let (x, y) = face.edge(e);
                    (x == a && y == b) || (x == b && y == a)
                })
                .map(|e| (FaceId(i), e))
        })
    }

    /// Flag edge `e` of `f` and its mirror as a segment.
    pub(crate) fn mark_segment(&mut self, f: FaceId, e: usize) -> Result<(), TinError> {
        self.face_mut(f).seg[e] = true;
        if let Some(n) = self.face(f).adj[e] {
            let ne = self.edge_towards(n, f)?;
            self.face_mut(n).seg[ne] = true;
        }
        Ok(())
    }

    /// Vertex adjacent to `a` lying strictly inside segment `ab`, closest to `a`.
    fn vertex_on_segment(&self, a: usize, b: usize) -> Option<usize> {
        let (pa, pb) = (self.pts[a], self.pts[b]);
        let ab = pb - pa;
        let len_sq = ab.norm_squared();
        let mut best: Option<(f64, usize)> = None;
        for face in self.faces.iter().filter(|face| face.has_vertex(a)) {
            for &c in face.v.iter().filter(|&&c| c != a && c != b) {
                let ac = self.pts[c] - pa;
                if cross(ab, ac).abs() > self.cfg.collinear_eps * len_sq {
                    continue;
                }
                let t = ab.dot(&ac) / len_sq;
                if t > 0.0 && t < 1.0 && best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, c));
                }
            }
        }
        best.map(|(_, c)| c)
    }

    /// Make sure `a`–`b` is a chain of mesh edges flagged as segments.
    ///
    /// Returns the number of midpoints inserted.
    pub fn seek_segment(&mut self, a: usize, b: usize) -> Result<usize, TinError> {
        let limit = self.cfg.max_subdivision_depth;
        let mut inserted = 0;
        let mut stack = vec![(a, b, 0usize)];
        while let Some((from, to, depth)) = stack.pop() {
            if from == to {
                continue;
            }
            if let Some((f, e)) = self.find_edge(from, to) {
                self.mark_segment(f, e)?;
                continue;
            }
            let mid = match self.vertex_on_segment(from, to) {
                Some(c) => c,
                None => {
                    if depth >= limit {
                        return Err(TinError::SubdivisionLimit { depth: limit });
                    }
                    let p = (self.pts[from] + self.pts[to]) * 0.5;
                    inserted += 1;
                    tracing::trace!(from, to, x = p.x, y = p.y, "segment midpoint");
                    self.insert(p)?
                }
            };
            stack.push((mid, to, depth + 1));
            stack.push((from, mid, depth + 1));
        }
        self.stats.midpoints += inserted;
        Ok(inserted)
    }
}
