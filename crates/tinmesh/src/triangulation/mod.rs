//! Finished triangulations: construction entry points and read accessors.
//!
//! Purpose
//! - Turn raw input (flat coordinate arrays, point objects, boundary rings)
//!   into a validated `MeshStore` run and freeze the result.
//! - After construction the value is immutable; all accessors are `&self`.
//!
//! Vertex numbering
//! - Unconstrained builds keep input order: vertex `i` is input point `i`,
//!   including coincident duplicates (which no face references).
//! - Bounded builds number ring vertices first (ring by ring, after dropping
//!   repeated consecutive vertices), then extra points, then the midpoints
//!   inserted during segment recovery.

use nalgebra::Vector2;

use crate::error::TinError;
use crate::geom2::{circumcircle, orient, Coord2, MeshCfg};
use crate::mesh::{check_boundary, BuildStats, Face, FaceId, MeshStore};

/// A completed (optionally constrained) Delaunay triangulation.
#[derive(Clone, Debug)]
pub struct Triangulation {
    pts: Vec<Vector2<f64>>,
    faces: Vec<Face>,
    bound: f64,
    stats: BuildStats,
}

impl Triangulation {
    /// Unconstrained build from `[x0, y0, x1, y1, ...]`.
    pub fn build(coords: &[f64]) -> Result<Self, TinError> {
        Self::build_with_cfg(coords, MeshCfg::default())
    }

    pub fn build_with_cfg(coords: &[f64], cfg: MeshCfg) -> Result<Self, TinError> {
        Self::unconstrained(parse_flat(coords, None)?, cfg)
    }

    /// Unconstrained build from point objects (z is ignored for 3D points).
    pub fn from_points<P: Coord2>(points: &[P]) -> Result<Self, TinError> {
        Self::from_points_with_cfg(points, MeshCfg::default())
    }

    pub fn from_points_with_cfg<P: Coord2>(points: &[P], cfg: MeshCfg) -> Result<Self, TinError> {
        Self::unconstrained(convert(points)?, cfg)
    }

    /// Constrained build. `rings[0]` is the exterior boundary, the rest are
    /// holes; each ring is a flat coordinate list, implicitly closed.
    /// `extra` holds additional interior points (flat).
    pub fn build_bounded(rings: &[Vec<f64>], extra: &[f64]) -> Result<Self, TinError> {
        Self::build_bounded_with_cfg(rings, extra, MeshCfg::default())
    }

    pub fn build_bounded_with_cfg(
        rings: &[Vec<f64>],
        extra: &[f64],
        cfg: MeshCfg,
    ) -> Result<Self, TinError> {
        let rings = rings
            .iter()
            .enumerate()
            .map(|(r, ring)| parse_flat(ring, Some(r)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::constrained(rings, parse_flat(extra, None)?, cfg)
    }

    /// Constrained build from rings of point objects.
    pub fn from_rings<P: Coord2>(rings: &[Vec<P>], extra: &[P]) -> Result<Self, TinError> {
        Self::from_rings_with_cfg(rings, extra, MeshCfg::default())
    }

    pub fn from_rings_with_cfg<P: Coord2>(
        rings: &[Vec<P>],
        extra: &[P],
        cfg: MeshCfg,
    ) -> Result<Self, TinError> {
        let rings = rings
            .iter()
            .map(|ring| convert(ring))
            .collect::<Result<Vec<_>, _>>()?;
        Self::constrained(rings, convert(extra)?, cfg)
    }

    fn unconstrained(pts: Vec<Vector2<f64>>, cfg: MeshCfg) -> Result<Self, TinError> {
        if pts.len() < 3 {
            return Err(TinError::Empty);
        }
        let mut store = MeshStore::new(bound_of(&pts), cfg);
        for &p in &pts {
            store.insert(p)?;
        }
        tracing::debug!(
            points = pts.len(),
            faces = store.num_faces(),
            flips = store.stats.flips,
            "points inserted"
        );
        store.strip_bootstrap();
        Ok(Self::freeze(store))
    }

    fn constrained(
        rings: Vec<Vec<Vector2<f64>>>,
        extra: Vec<Vector2<f64>>,
        cfg: MeshCfg,
    ) -> Result<Self, TinError> {
        if rings.is_empty() {
            return Self::unconstrained(extra, cfg);
        }
        let rings = rings
            .into_iter()
            .enumerate()
            .map(|(r, ring)| dedup_ring(r, ring))
            .collect::<Result<Vec<_>, _>>()?;
        check_boundary(&rings)?;

        let all = rings.iter().flatten().chain(extra.iter()).copied();
        let mut store = MeshStore::new(bound_of_iter(all), cfg);
        let mut ids = Vec::with_capacity(rings.len());
        for ring in &rings {
            let mut ring_ids = Vec::with_capacity(ring.len());
            for &p in ring {
                ring_ids.push(store.insert(p)?);
            }
            ids.push(ring_ids);
        }
        for &p in &extra {
            store.insert(p)?;
        }
        let mut midpoints = 0;
        for ring in &ids {
            for (i, &a) in ring.iter().enumerate() {
                midpoints += store.seek_segment(a, ring[(i + 1) % ring.len()])?;
            }
        }
        tracing::debug!(
            rings = rings.len(),
            midpoints,
            faces = store.num_faces(),
            "segments recovered"
        );
        store.strip_exterior(&rings[1..])?;
        Ok(Self::freeze(store))
    }

    fn freeze(store: MeshStore) -> Self {
        Self {
            pts: store.pts,
            faces: store.faces,
            bound: store.bound,
            stats: store.stats,
        }
    }

    /// Flat triangle index array, `3 * num_faces()` long.
    pub fn indices(&self) -> Vec<usize> {
        self.faces.iter().flat_map(|f| f.v).collect()
    }

    /// Flat vertex coordinates `[x0, y0, x1, y1, ...]`.
    pub fn points(&self) -> Vec<f64> {
        self.pts.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.pts
    }

    pub fn point(&self, i: usize) -> Option<Vector2<f64>> {
        self.pts.get(i).copied()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.faces.iter().map(|f| f.v)
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    /// Half-width of the origin-centred square holding every input point.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Neighbors across edges 0, 1, 2 of `f`; `None` for an unknown face.
    pub fn neighbors(&self, f: FaceId) -> Option<[Option<FaceId>; 3]> {
        self.faces.get(f.0).map(|face| face.adj)
    }

    /// Whether edge `e` of `f` is constrained; `None` for an unknown face or edge.
    pub fn is_segment(&self, f: FaceId, e: usize) -> Option<bool> {
        self.faces.get(f.0)?.seg.get(e).copied()
    }

    /// Constrained edges as `[lo, hi]` vertex pairs, each listed once.
    pub fn segments(&self) -> Vec<[usize; 2]> {
        let mut out = Vec::new();
        for (i, face) in self.faces.iter().enumerate() {
            for e in 0..3 {
                if !face.seg[e] || face.adj[e].is_some_and(|n| n.0 < i) {
                    continue;
                }
                let (a, b) = face.edge(e);
                out.push([a.min(b), a.max(b)]);
            }
        }
        out
    }

    /// Check index bounds, CCW winding and neighbor symmetry.
    pub fn validate(&self) -> Result<(), TinError> {
        for (i, face) in self.faces.iter().enumerate() {
            if face.v.iter().any(|&v| v >= self.pts.len()) {
                return Err(TinError::DegenerateGeometry {
                    reason: "face references a missing vertex",
                });
            }
            let [a, b, c] = face.v.map(|v| self.pts[v]);
            if orient(a, b, c) <= 0.0 {
                return Err(TinError::DegenerateGeometry {
                    reason: "face is not counterclockwise",
                });
            }
            for e in 0..3 {
                let Some(n) = face.adj[e] else { continue };
                let broken = TinError::BrokenAdjacency {
                    face: i,
                    neighbor: n.0,
                };
                let other = self.faces.get(n.0).ok_or(broken.clone())?;
                let ne = other
                    .adj
                    .iter()
                    .position(|&m| m == Some(FaceId(i)))
                    .ok_or(broken.clone())?;
                let (x, y) = face.edge(e);
                if other.edge(ne) != (y, x) || other.seg[ne] != face.seg[e] {
                    return Err(broken);
                }
            }
        }
        Ok(())
    }

    /// Whether every unconstrained interior edge passes the empty-circle test
    /// (with a small relative tolerance for cocircular quads).
    pub fn is_delaunay(&self) -> bool {
        self.faces.iter().all(|face| {
            let [a, b, c] = face.v.map(|v| self.pts[v]);
            let Ok(circle) = circumcircle(a, b, c, 1e-12) else {
                return false;
            };
            (0..3).all(|e| match face.adj[e] {
                Some(n) if !face.seg[e] => self.faces[n.0]
                    .v
                    .iter()
                    .filter(|v| !face.has_vertex(**v))
                    .all(|&w| {
                        (self.pts[w] - circle.center).norm_squared()
                            >= circle.radius_sq * (1.0 - 1e-9)
                    }),
                _ => true,
            })
        })
    }
}

fn parse_flat(coords: &[f64], ring: Option<usize>) -> Result<Vec<Vector2<f64>>, TinError> {
    if coords.len() % 2 != 0 {
        return Err(TinError::OddCoordinateCount {
            ring,
            len: coords.len(),
        });
    }
    if let Some(index) = coords.iter().position(|c| !c.is_finite()) {
        return Err(TinError::NonFinite { index });
    }
    Ok(coords
        .chunks_exact(2)
        .map(|c| Vector2::new(c[0], c[1]))
        .collect())
}

fn convert<P: Coord2>(points: &[P]) -> Result<Vec<Vector2<f64>>, TinError> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let v = p.to_vec2();
            if !v.x.is_finite() {
                Err(TinError::NonFinite { index: 2 * i })
            } else if !v.y.is_finite() {
                Err(TinError::NonFinite { index: 2 * i + 1 })
            } else {
                Ok(v)
            }
        })
        .collect()
}

/// Drop repeated consecutive vertices (including an explicit closing vertex).
fn dedup_ring(r: usize, mut ring: Vec<Vector2<f64>>) -> Result<Vec<Vector2<f64>>, TinError> {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 {
        return Err(TinError::BoundaryTooShort {
            ring: r,
            vertices: ring.len(),
        });
    }
    Ok(ring)
}

fn bound_of(pts: &[Vector2<f64>]) -> f64 {
    bound_of_iter(pts.iter().copied())
}

fn bound_of_iter(pts: impl Iterator<Item = Vector2<f64>>) -> f64 {
    let b = pts.fold(0.0_f64, |b, p| b.max(p.x.abs()).max(p.y.abs()));
    if b == 0.0 {
        1.0
    } else {
        b
    }
}
