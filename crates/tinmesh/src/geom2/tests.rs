use super::rand::{draw_points, PointCloudCfg, Region2, ReplayToken};
use super::*;
use crate::error::TinError;
use nalgebra::{vector, Point3};

#[test]
fn circumcircle_right_triangles() {
    let c = circumcircle(vector![0.0, 0.0], vector![2.0, 0.0], vector![0.0, 2.0], 1e-12).unwrap();
    assert!((c.center - vector![1.0, 1.0]).norm() < 1e-12);
    assert!((c.radius_sq - 2.0).abs() < 1e-12);

    let c = circumcircle(vector![0.0, 0.0], vector![4.0, 0.0], vector![4.0, 4.0], 1e-12).unwrap();
    assert!((c.center - vector![2.0, 2.0]).norm() < 1e-12);
    assert!((c.radius_sq - 8.0).abs() < 1e-12);
}

#[test]
fn circumcircle_is_equidistant_for_arbitrary_triangle() {
    let (p0, p1, p2) = (vector![0.3, -1.2], vector![5.1, 0.4], vector![-2.0, 3.3]);
    let c = circumcircle(p0, p1, p2, 1e-12).unwrap();
    for p in [p0, p1, p2] {
        assert!(((p - c.center).norm_squared() - c.radius_sq).abs() < 1e-9);
    }
}

#[test]
fn circumcircle_rejects_collinear_points() {
    let err = circumcircle(vector![0.0, 0.0], vector![1.0, 1.0], vector![3.0, 3.0], 1e-12);
    assert!(matches!(err, Err(TinError::DegenerateGeometry { .. })));
}

#[test]
fn in_circle_sign_and_cocircular_zero() {
    let (a, b, c) = (vector![0.0, 0.0], vector![4.0, 0.0], vector![4.0, 4.0]);
    assert!(in_circle(a, b, c, vector![2.0, 2.5]) > 0.0);
    assert!(in_circle(a, b, c, vector![-1.0, 5.0]) < 0.0);
    assert_eq!(in_circle(a, b, c, vector![0.0, 4.0]), 0.0);
}

#[test]
fn in_circle_flips_sign_with_the_diagonal() {
    // Three consecutive hexagon corners and the one across: nearly cocircular.
    let p = |k: f64| {
        let t = std::f64::consts::FRAC_PI_3 * k;
        vector![t.cos(), t.sin()]
    };
    let (z, a, w, b) = (p(0.0), p(1.0), p(2.0), p(4.0));
    let d1 = in_circle(z, a, b, w);
    let d2 = in_circle(w, b, z, a);
    assert!((d1 == 0.0 && d2 == 0.0) || d1.signum() == -d2.signum());
}

#[test]
fn circle_containment_is_strict() {
    let c = Circle {
        center: vector![0.0, 0.0],
        radius_sq: 1.0,
    };
    assert!(c.contains(vector![0.5, 0.5]));
    assert!(!c.contains(vector![1.0, 0.0]));
    assert!(!c.contains(vector![2.0, 0.0]));
}

#[test]
fn orient_sign_matches_winding() {
    let (a, b, c) = (vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]);
    assert!(orient(a, b, c) > 0.0);
    assert!(orient(a, c, b) < 0.0);
    assert_eq!(orient(a, b, vector![2.0, 0.0]), 0.0);
    assert_eq!(cross(b, c), 1.0);
}

#[test]
fn segments_cross_is_proper_only() {
    let o = vector![0.0, 0.0];
    // X shape
    assert!(segments_cross(o, vector![2.0, 2.0], vector![0.0, 2.0], vector![2.0, 0.0]));
    // shared endpoint
    assert!(!segments_cross(o, vector![1.0, 0.0], o, vector![0.0, 1.0]));
    // T junction touching the other segment's interior
    assert!(!segments_cross(o, vector![2.0, 0.0], vector![1.0, 0.0], vector![1.0, 1.0]));
    // disjoint
    assert!(!segments_cross(o, vector![1.0, 0.0], vector![0.0, 1.0], vector![1.0, 1.0]));
    // collinear overlap
    assert!(!segments_cross(o, vector![2.0, 0.0], vector![1.0, 0.0], vector![3.0, 0.0]));
}

#[test]
fn inside_ring_excludes_the_boundary() {
    let sq = vec![
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
    ];
    let rev: Vec<_> = sq.iter().rev().copied().collect();
    for ring in [&sq, &rev] {
        assert!(inside_ring(vector![1.0, 1.0], ring));
        assert!(inside_ring(vector![0.1, 1.9], ring));
        assert!(!inside_ring(vector![1.0, 0.0], ring));
        assert!(!inside_ring(vector![2.0, 2.0], ring));
        assert!(!inside_ring(vector![3.0, 1.0], ring));
        assert!(!inside_ring(vector![-1.0, 0.0], ring));
    }
}

#[test]
fn interior_point_convex_square_uses_ear_centroid() {
    let sq = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ];
    let p = interior_point(&sq).unwrap();
    assert!((p - vector![2.0 / 3.0, 1.0 / 3.0]).norm() < 1e-12);
    let rev: Vec<_> = sq.iter().rev().copied().collect();
    assert!(inside_ring(interior_point(&rev).unwrap(), &rev));
}

#[test]
fn interior_point_chevron_avoids_notch() {
    // The centroid of the rightmost ear candidate lies in the notch.
    let chevron = vec![
        vector![0.0, 0.0],
        vector![10.0, 5.0],
        vector![0.0, 10.0],
        vector![8.0, 5.0],
    ];
    let p = interior_point(&chevron).unwrap();
    assert!((p - vector![9.0, 5.0]).norm() < 1e-12);
    assert!(inside_ring(p, &chevron));
}

#[test]
fn interior_point_thin_comb() {
    // Comb with teeth pointing left; rightmost vertex is on the spine.
    let mut ring = vec![vector![0.0, 0.0], vector![10.0, 0.0], vector![10.0, 10.0]];
    for k in (0..5).rev() {
        let y = 2.0 * k as f64;
        ring.push(vector![0.0, y + 2.0]);
        ring.push(vector![9.0, y + 1.5]);
        ring.push(vector![9.0, y + 0.5]);
    }
    ring.pop();
    ring.pop();
    assert!(inside_ring(interior_point(&ring).unwrap(), &ring));
}

#[test]
fn interior_point_rejects_collinear_extremum() {
    let ring = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![2.0, 0.0]];
    assert!(matches!(
        interior_point(&ring),
        Err(TinError::DegenerateGeometry { .. })
    ));
}

#[test]
fn coord2_adapters_agree() {
    let v = vector![1.5, -2.0];
    assert_eq!([1.5, -2.0].to_vec2(), v);
    assert_eq!((1.5, -2.0).to_vec2(), v);
    assert_eq!([1.5, -2.0, 7.0].to_vec2(), v);
    assert_eq!(Point3::new(1.5, -2.0, 7.0).to_vec2(), v);
    assert_eq!(v.to_vec2(), v);
}

#[test]
fn mesh_cfg_default_threshold_is_three_degrees() {
    let cfg = MeshCfg::default();
    assert!((cfg.on_edge_cos - 3f64.to_radians().cos()).abs() < 1e-8);
    assert_eq!(cfg.bootstrap_scale, 3.0);
}

#[test]
fn point_cloud_is_replayable_and_in_region() {
    let cfg = PointCloudCfg {
        count: 64,
        region: Region2::Box2 {
            min: vector![-1.0, 2.0],
            max: vector![1.0, 3.0],
        },
    };
    let tok = ReplayToken::new(7);
    let a = draw_points(cfg, tok);
    let b = draw_points(cfg, tok);
    assert_eq!(a, b);
    assert_ne!(a, draw_points(cfg, tok.next()));
    assert!(a
        .iter()
        .all(|p| (-1.0..=1.0).contains(&p.x) && (2.0..=3.0).contains(&p.y)));

    let disk = PointCloudCfg {
        count: 64,
        region: Region2::Disk {
            center: vector![5.0, 5.0],
            radius: 2.0,
        },
    };
    assert!(draw_points(disk, tok)
        .iter()
        .all(|p| (p - vector![5.0, 5.0]).norm() <= 2.0 + 1e-12));
}
