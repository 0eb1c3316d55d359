//! Geometric predicates on plain `f64` coordinates.
//!
//! Everything except `in_circle` is direct floating-point arithmetic.
//! `in_circle` uses adaptive exact arithmetic so flip decisions never
//! contradict each other. Degenerate inputs are reported through
//! `TinError::DegenerateGeometry` instead of producing NaN.

use nalgebra::Vector2;
use robust::{incircle, Coord};

use super::types::Circle;
use crate::error::TinError;

/// Signed area of the parallelogram spanned by `a` and `b`.
/// Positive for a→b counterclockwise.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Twice the signed area of triangle `(a, b, c)`; positive when CCW.
#[inline]
pub fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    cross(b - a, c - a)
}

/// Exact in-circle determinant: positive when `d` lies strictly inside the
/// circle through the CCW triangle `(a, b, c)`, zero when the four points are
/// cocircular. Swapping the roles of the two diagonals of a quad negates it.
#[inline]
pub fn in_circle(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, d: Vector2<f64>) -> f64 {
    let co = |p: Vector2<f64>| Coord { x: p.x, y: p.y };
    incircle(co(a), co(b), co(c), co(d))
}

/// Circumcircle of `(p0, p1, p2)` via perpendicular bisectors.
///
/// With `e = p1 - p0`, `n = perp(p2 - p1)` and `d = (p0 - p2) / 2`, the center is
/// `mid(p1, p2) + s n` where `s = (e·d) / (e·n)`. Fails when `|e·n|` is below
/// `eps_det · |e| · |n|`, i.e. the three points are (nearly) collinear.
pub fn circumcircle(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    eps_det: f64,
) -> Result<Circle, TinError> {
    let e = p1 - p0;
    let n = Vector2::new(p2.y - p1.y, p1.x - p2.x);
    let d = (p0 - p2) * 0.5;
    let den = e.dot(&n);
    if !(den.abs() > eps_det * (e.norm_squared() * n.norm_squared()).sqrt()) {
        return Err(TinError::DegenerateGeometry {
            reason: "circumcircle of collinear points",
        });
    }
    let s = e.dot(&d) / den;
    let center = (p1 + p2) * 0.5 + n * s;
    Ok(Circle {
        center,
        radius_sq: (p0 - center).norm_squared(),
    })
}

/// Proper crossing of segments `ab` and `cd`: each segment straddles the
/// infinite line through the other. Shared endpoints and collinear overlap
/// are not crossings.
#[inline]
pub fn segments_cross(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    d: Vector2<f64>,
) -> bool {
    let d1 = orient(a, b, c);
    let d2 = orient(a, b, d);
    let d3 = orient(c, d, a);
    let d4 = orient(c, d, b);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// `p` lies strictly inside the simple polygon `ring` (either winding).
/// Points on the boundary are not inside.
pub fn inside_ring(p: Vector2<f64>, ring: &[Vector2<f64>]) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        if orient(a, b, p) == 0.0 && (a - p).dot(&(b - p)) <= 0.0 {
            return false;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// A point strictly inside the simple polygon `ring` (either winding).
///
/// Takes the rightmost vertex `v` (lowest y on ties) and its ring neighbours
/// `a`, `b`. `v` is convex, so if no other vertex lies inside triangle `a v b`
/// the triangle's centroid is interior. Otherwise the intruder farthest from
/// line `ab` sees `v` through the polygon and their midpoint is interior.
pub fn interior_point(ring: &[Vector2<f64>]) -> Result<Vector2<f64>, TinError> {
    let n = ring.len();
    if n < 3 {
        return Err(TinError::DegenerateGeometry {
            reason: "ring with fewer than 3 vertices",
        });
    }
    let mut k = 0;
    for (i, p) in ring.iter().enumerate().skip(1) {
        let q = ring[k];
        if p.x > q.x || (p.x == q.x && p.y < q.y) {
            k = i;
        }
    }
    let ia = (k + n - 1) % n;
    let ib = (k + 1) % n;
    let (a, v, b) = (ring[ia], ring[k], ring[ib]);
    let area = orient(a, v, b);
    if area == 0.0 {
        return Err(TinError::DegenerateGeometry {
            reason: "collinear vertices at ring extremum",
        });
    }
    let sign = area.signum();
    let strictly_inside = |q: Vector2<f64>| {
        sign * orient(a, v, q) > 0.0 && sign * orient(v, b, q) > 0.0 && sign * orient(b, a, q) > 0.0
    };
    let ab = b - a;
    let mut best: Option<(f64, Vector2<f64>)> = None;
    for (i, &q) in ring.iter().enumerate() {
        if i == k || i == ia || i == ib || !strictly_inside(q) {
            continue;
        }
        let dist = cross(ab, q - a).abs();
        if best.map_or(true, |(d, _)| dist > d) {
            best = Some((dist, q));
        }
    }
    Ok(match best {
        Some((_, q)) => (v + q) * 0.5,
        None => (a + v + b) / 3.0,
    })
}
