//! Stitching successive cross-section profiles into one TIN.
//!
//! Each profile is a list of segments (for a river: bank, slope, bed, ...),
//! every segment a run of 3D points. Segment `i` of a profile is joined only
//! with segment `i` of the next profile: both are projected to the xy-plane,
//! triangulated together, and triangles lying entirely on one profile are
//! discarded. Heights are carried through untouched.

use crate::error::TinError;
use crate::geom2::MeshCfg;
use crate::triangulation::Triangulation;

/// Incremental profile-to-TIN builder.
#[derive(Clone, Debug, Default)]
pub struct ProfileTriangulator {
    cfg: MeshCfg,
    prev: Option<Vec<Vec<[f64; 3]>>>,
    points: Vec<[f64; 3]>,
    indices: Vec<usize>,
    profiles: usize,
}

impl ProfileTriangulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfg(cfg: MeshCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    /// Add the next profile. Nothing is triangulated for the first one.
    ///
    /// Fails without changing state when the segment count differs from the
    /// previous profile or a segment pair cannot be triangulated.
    pub fn add_segmented_profile(&mut self, segments: &[Vec<[f64; 3]>]) -> Result<(), TinError> {
        if let Some(prev) = &self.prev {
            if prev.len() != segments.len() {
                return Err(TinError::SegmentCountMismatch {
                    expected: prev.len(),
                    found: segments.len(),
                });
            }
            let mut points = Vec::new();
            let mut indices = Vec::new();
            for (old, new) in prev.iter().zip(segments) {
                let merged: Vec<[f64; 3]> = old.iter().chain(new.iter()).copied().collect();
                if merged.len() < 3 {
                    continue;
                }
                let tin = Triangulation::from_points_with_cfg(&merged, self.cfg)?;
                let base = self.points.len() + points.len();
                let split = old.len();
                for t in tin.triangles() {
                    if t.iter().all(|&v| v < split) || t.iter().all(|&v| v >= split) {
                        continue;
                    }
                    indices.extend(t.map(|v| v + base));
                }
                points.extend(merged);
            }
            tracing::debug!(
                profile = self.profiles,
                points = points.len(),
                faces = indices.len() / 3,
                "profile joined"
            );
            self.points.extend(points);
            self.indices.extend(indices);
        }
        self.prev = Some(segments.to_vec());
        self.profiles += 1;
        Ok(())
    }

    /// Flat `[x0, y0, z0, x1, ...]`.
    pub fn points(&self) -> Vec<f64> {
        self.points.iter().flatten().copied().collect()
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_faces(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn num_profiles(&self) -> usize {
        self.profiles
    }
}
