//! Removal of everything outside the user's domain, then compaction.

use nalgebra::Vector2;

use super::types::{FaceId, MeshStore, BOOTSTRAP_VERTICES};
use crate::error::TinError;
use crate::geom2::interior_point;

impl MeshStore {
    /// Mark `seed` and every face reachable from it without crossing a
    /// segment as obsolete.
    pub(crate) fn eat(&self, seed: FaceId, obsolete: &mut [bool]) {
        let mut stack = vec![seed];
        while let Some(f) = stack.pop() {
            if obsolete[f.0] {
                continue;
            }
            obsolete[f.0] = true;
            let face = self.face(f);
            for e in 0..3 {
                match face.adj[e] {
                    Some(n) if !face.seg[e] && !obsolete[n.0] => stack.push(n),
                    _ => {}
                }
            }
        }
    }

    /// Unconstrained mode: drop every face touching a bootstrap corner.
    pub fn strip_bootstrap(&mut self) {
        let none = vec![false; self.faces.len()];
        self.compact(&none);
    }

    /// Constrained mode: flood from the bootstrap corners (outside the first
    /// ring) and from one interior point of every hole ring.
    pub fn strip_exterior(&mut self, holes: &[Vec<Vector2<f64>>]) -> Result<(), TinError> {
        let mut obsolete = vec![false; self.faces.len()];
        for corner in 0..BOOTSTRAP_VERTICES {
            if let Some(i) = self.faces.iter().position(|face| face.has_vertex(corner)) {
                self.eat(FaceId(i), &mut obsolete);
            }
        }
        for ring in holes {
            let p = interior_point(ring)?;
            let (f, _) = self.locate(p)?;
            self.eat(f, &mut obsolete);
        }
        self.compact(&obsolete);
        Ok(())
    }

    /// Delete obsolete faces, renumber neighbors and drop the bootstrap corners.
    ///
    /// Faces still touching a corner are dropped as well.
    pub(crate) fn compact(&mut self, obsolete: &[bool]) {
        let obsolete: Vec<bool> = self
            .faces
            .iter()
            .zip(obsolete)
            .map(|(face, &gone)| gone || face.v.iter().any(|&v| self.is_bootstrap(v)))
            .collect();
        let mut remap = Vec::with_capacity(self.faces.len());
        let mut next = 0;
        for &gone in &obsolete {
            remap.push(if gone { None } else { Some(FaceId(next)) });
            next += usize::from(!gone);
        }
        let shift = if self.boot { BOOTSTRAP_VERTICES } else { 0 };
        let before = self.faces.len();
        let faces = std::mem::take(&mut self.faces);
        self.faces = faces
            .into_iter()
            .zip(&obsolete)
            .filter(|(_, &gone)| !gone)
            .map(|(mut face, _)| {
                face.adj = face.adj.map(|n| n.and_then(|n| remap[n.0]));
                face.v = face.v.map(|v| v - shift);
                face
            })
            .collect();
        if self.boot {
            self.pts.drain(..BOOTSTRAP_VERTICES);
            self.boot = false;
        }
        self.stats.removed_faces += before - self.faces.len();
        tracing::debug!(
            removed = before - self.faces.len(),
            faces = self.faces.len(),
            points = self.pts.len(),
            "exterior removed"
        );
    }
}
