//! Store-level tests: topology after each primitive, locate classification,
//! segment recovery and compaction.

use super::*;
use crate::error::TinError;
use crate::geom2::{orient, MeshCfg};
use nalgebra::{vector, Vector2};

fn store(bound: f64) -> MeshStore {
    MeshStore::new(bound, MeshCfg::default())
}

/// Every neighbor points back across the same (reversed) edge with the same
/// segment flag, and every face is CCW.
fn assert_consistent(s: &MeshStore) {
    for (i, face) in s.faces.iter().enumerate() {
        let f = FaceId(i);
        let [a, b, c] = s.corners(f);
        assert!(orient(a, b, c) > 0.0, "face {i} not CCW");
        for e in 0..3 {
            let Some(n) = face.adj[e] else { continue };
            let ne = s.edge_towards(n, f).unwrap();
            let (x, y) = face.edge(e);
            assert_eq!(s.face(n).edge(ne), (y, x), "face {i} edge {e}");
            assert_eq!(s.face(n).seg[ne], face.seg[e]);
        }
    }
}

#[test]
fn bootstrap_triangle_is_ccw_and_scaled() {
    let s = store(2.0);
    assert_eq!(s.num_points(), 3);
    assert_eq!(s.num_faces(), 1);
    assert_eq!(s.point(0), vector![6.0, 0.0]);
    assert_eq!(s.point(1), vector![0.0, 6.0]);
    assert_eq!(s.point(2), vector![-6.0, -6.0]);
    assert!(s.is_bootstrap(2) && !s.is_bootstrap(3));
    assert_consistent(&s);
}

#[test]
fn reserve_grows_storage() {
    let cfg = MeshCfg {
        initial_capacity: 3,
        ..MeshCfg::default()
    };
    let mut s = MeshStore::new(1.0, cfg);
    for i in 0..40 {
        let id = s.reserve_vertex(vector![i as f64, 0.0]);
        assert_eq!(id, i + 3);
    }
    assert!(s.pts.capacity() >= 43);
    let base = s.reserve_faces(3);
    assert_eq!(base, FaceId(1));
    assert!(s.faces.capacity() >= 4);
}

#[test]
fn locate_classifies_inside_vertex_edge_and_outside() {
    let s = store(1.0);
    assert_eq!(s.locate(vector![0.0, 0.0]).unwrap(), (FaceId(0), Classification::Inside));
    assert_eq!(
        s.locate(vector![0.0, 3.0]).unwrap(),
        (FaceId(0), Classification::Vertex(1))
    );
    // Exactly on the hull edge between corners 0 and 1.
    assert_eq!(
        s.locate(vector![1.5, 1.5]).unwrap(),
        (FaceId(0), Classification::OnEdge(2))
    );
    // Within 3° of that hull edge but not on it: no neighbor to absorb the sliver.
    assert_eq!(
        s.locate(vector![1.4, 1.5]).unwrap(),
        (FaceId(0), Classification::Inside)
    );
    assert!(matches!(
        s.locate(vector![10.0, 10.0]),
        Err(TinError::PointOutside { .. })
    ));
}

#[test]
fn triangle_split_then_edge_split() {
    let mut s = store(1.0);
    let origin = s.insert(vector![0.0, 0.0]).unwrap();
    assert_eq!(origin, 3);
    assert_eq!(s.num_faces(), 3);
    assert_consistent(&s);

    // On the interior edge from the origin to corner 0.
    let (_, class) = s.locate(vector![1.0, 0.0]).unwrap();
    assert!(matches!(class, Classification::OnEdge(_)));
    s.insert(vector![1.0, 0.0]).unwrap();
    assert_eq!(s.num_faces(), 5);
    assert_eq!(s.stats.edge_splits, 1);
    assert_consistent(&s);
}

#[test]
fn hull_edge_split_adds_one_face() {
    let mut s = store(1.0);
    s.insert(vector![1.5, 1.5]).unwrap();
    assert_eq!(s.num_faces(), 2);
    assert_consistent(&s);
    assert!(s.faces.iter().filter(|f| f.adj.contains(&None)).count() == 2);
}

#[test]
fn insertion_sequence_stays_consistent() {
    let mut s = store(1.0);
    let pts = [
        vector![0.1, 0.2],
        vector![-0.7, 0.4],
        vector![0.9, -0.3],
        vector![0.2, 0.95],
        vector![-0.4, -0.8],
        vector![0.55, 0.5],
        vector![0.0, 0.0],
        vector![-0.9, -0.9],
    ];
    for (k, &p) in pts.iter().enumerate() {
        s.insert(p).unwrap();
        assert_consistent(&s);
        assert_eq!(s.num_faces(), 1 + 2 * (k + 1));
    }
}

#[test]
fn flip_keeps_adjacency() {
    let mut s = store(1.0);
    for p in [vector![0.0, -0.5], vector![0.0, 0.5], vector![-0.5, 0.0]] {
        s.insert(p).unwrap();
    }
    // Any interior edge between real vertices whose quad is strictly convex.
    let (f, e) = (0..s.num_faces())
        .flat_map(|i| (0..3).map(move |e| (FaceId(i), e)))
        .find(|&(f, e)| {
            let face = s.face(f);
            let Some(n) = face.adj[e] else { return false };
            let (a, b) = face.edge(e);
            let w = s.face(n).v[s.edge_towards(n, f).unwrap()];
            let [pz, pa, pb, pw] = [face.v[e], a, b, w].map(|v| s.point(v));
            !s.is_bootstrap(a)
                && !s.is_bootstrap(b)
                && orient(pz, pa, pw) > 0.0
                && orient(pw, pb, pz) > 0.0
        })
        .unwrap();
    let n = s.flip(f, e).unwrap();
    assert_consistent(&s);
    let back = s.edge_towards(f, n).unwrap();
    s.flip(f, back).unwrap();
    assert_consistent(&s);
}

#[test]
fn seek_segment_inserts_midpoint_when_edge_is_missing() {
    let mut s = store(10.0);
    let a = s.insert(vector![-1.0, 0.0]).unwrap();
    let b = s.insert(vector![1.0, 0.0]).unwrap();
    s.insert(vector![0.0, 0.05]).unwrap();
    s.insert(vector![0.0, -0.05]).unwrap();
    assert!(s.find_edge(a, b).is_none());

    let added = s.seek_segment(a, b).unwrap();
    assert_eq!(added, 1);
    let mid = s.num_points() - 1;
    assert_eq!(s.point(mid), vector![0.0, 0.0]);
    for (u, v) in [(a, mid), (mid, b)] {
        let (f, e) = s.find_edge(u, v).unwrap();
        assert!(s.face(f).seg[e]);
    }
    assert_consistent(&s);
}

#[test]
fn seek_segment_reuses_vertex_on_the_segment() {
    let mut s = store(2.0);
    let a = s.insert(vector![-1.0, 0.0]).unwrap();
    let c = s.insert(vector![0.0, 0.0]).unwrap();
    let b = s.insert(vector![1.0, 0.0]).unwrap();
    s.insert(vector![0.0, 1.0]).unwrap();
    s.insert(vector![0.0, -1.0]).unwrap();
    assert_eq!(s.seek_segment(a, b).unwrap(), 0);
    assert!(s.find_edge(a, c).is_some_and(|(f, e)| s.face(f).seg[e]));
    assert!(s.find_edge(c, b).is_some_and(|(f, e)| s.face(f).seg[e]));
}

#[test]
fn segments_block_flips_and_floods() {
    let mut s = store(4.0);
    let ring = [
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
    ];
    let ids: Vec<usize> = ring.iter().map(|&p| s.insert(p).unwrap()).collect();
    for i in 0..4 {
        s.seek_segment(ids[i], ids[(i + 1) % 4]).unwrap();
    }
    // Just below the bottom side, well within the snapping angle.
    s.insert(vector![1.0, -0.01]).unwrap();
    let (f, e) = s.find_edge(ids[0], ids[1]).unwrap();
    assert!(s.face(f).seg[e]);

    let mut obsolete = vec![false; s.num_faces()];
    let seed = s.faces.iter().position(|face| face.has_vertex(0)).unwrap();
    s.eat(FaceId(seed), &mut obsolete);
    let inside = obsolete.iter().filter(|&&o| !o).count();
    assert_eq!(inside, 2);
    s.compact(&obsolete);
    assert!(!s.boot);
    assert_eq!(s.num_faces(), 2);
    assert_eq!(s.num_points(), 5);
    assert!(s.faces.iter().all(|f| f.v.iter().all(|&v| v < 4)));
    assert_consistent(&s);
}

#[test]
fn strip_bootstrap_renumbers() {
    let mut s = store(1.0);
    for p in [vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]] {
        s.insert(p).unwrap();
    }
    s.strip_bootstrap();
    assert_eq!(s.num_points(), 3);
    assert_eq!(s.num_faces(), 1);
    let mut v = s.faces[0].v;
    v.sort_unstable();
    assert_eq!(v, [0, 1, 2]);
    assert_eq!(s.faces[0].adj, [None; 3]);
}

#[test]
fn check_boundary_accepts_touching_and_rejects_crossing() {
    let square: Vec<Vector2<f64>> = vec![
        vector![0.0, 0.0],
        vector![4.0, 0.0],
        vector![4.0, 4.0],
        vector![0.0, 4.0],
    ];
    // Hole touching the outer ring at one vertex.
    let touching = vec![vector![0.0, 2.0], vector![2.0, 1.0], vector![2.0, 3.0]];
    assert!(check_boundary(&[square.clone(), touching]).is_ok());
    let crossing = vec![vector![1.0, 1.0], vector![5.0, 2.0], vector![1.0, 3.0]];
    assert_eq!(
        check_boundary(&[square, crossing]),
        Err(TinError::BoundaryIntersection {
            ring_a: 0,
            edge_a: 1,
            ring_b: 1,
            edge_b: 0
        })
    );
}

#[test]
fn check_boundary_rejects_a_hole_inside_a_hole() {
    let square = |lo: f64, hi: f64| -> Vec<Vector2<f64>> {
        vec![vector![lo, lo], vector![hi, lo], vector![hi, hi], vector![lo, hi]]
    };
    let rings = [square(0.0, 4.0), square(1.0, 3.0), square(1.5, 2.5)];
    assert_eq!(
        check_boundary(&rings),
        Err(TinError::NestedRings { outer: 1, inner: 2 })
    );
    // The exterior ring is allowed to contain every hole.
    assert!(check_boundary(&rings[..2]).is_ok());
}

/// Interior real edges whose quad is strictly convex, as `(face, edge)`.
fn flippable_real_edges(s: &MeshStore) -> Vec<(FaceId, usize)> {
    (0..s.num_faces())
        .flat_map(|i| (0..3).map(move |e| (FaceId(i), e)))
        .filter(|&(f, e)| {
            let face = s.face(f);
            let Some(n) = face.adj[e] else { return false };
            let (a, b) = face.edge(e);
            let w = s.face(n).v[s.edge_towards(n, f).unwrap()];
            let [pz, pa, pb, pw] = [face.v[e], a, b, w].map(|v| s.point(v));
            [face.v[e], a, b, w].iter().all(|&v| !s.is_bootstrap(v))
                && orient(pz, pa, pw) > 0.0
                && orient(pw, pb, pz) > 0.0
        })
        .collect()
}

#[test]
fn cocircular_square_diagonal_is_stable() {
    let mut s = store(2.0);
    for p in [
        vector![-1.0, -1.0],
        vector![1.0, -1.0],
        vector![1.0, 1.0],
        vector![-1.0, 1.0],
    ] {
        s.insert(p).unwrap();
    }
    let edges = flippable_real_edges(&s);
    assert_eq!(edges.len(), 2, "one diagonal seen from both faces");
    let (f, e) = edges[0];
    assert!(!s.is_illegal(f, e).unwrap());
    let n = s.flip(f, e).unwrap();
    let back = s.edge_towards(f, n).unwrap();
    assert!(!s.is_illegal(f, back).unwrap());
}

#[test]
fn hexagon_diagonals_never_both_illegal() {
    let mut s = store(1.0);
    // Not exactly cocircular after rounding; the verdict must still be one-sided.
    for k in 0..6 {
        let t = std::f64::consts::FRAC_PI_3 * k as f64;
        s.insert(vector![t.cos(), t.sin()]).unwrap();
    }
    assert_consistent(&s);
    let edges = flippable_real_edges(&s);
    assert!(!edges.is_empty());
    for (f, e) in edges {
        let before = s.is_illegal(f, e).unwrap();
        let mut t = s.clone();
        let n = t.flip(f, e).unwrap();
        assert_consistent(&t);
        let back = t.edge_towards(f, n).unwrap();
        let after = t.is_illegal(f, back).unwrap();
        assert!(!(before && after), "face {} edge {e}", f.0);
    }
}
