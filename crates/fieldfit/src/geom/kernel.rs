//! Pure polygon functions over vertex slices.
//!
//! All functions treat the slice as an implicitly closed ring. None of them
//! validate their input; `Polygon::new` does that once at the boundary.

use nalgebra::Rotation2;

use super::Vec2;

/// z-component of the cross product `a × b`.
#[inline]
pub fn cross2(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Shoelace area; positive for counter-clockwise rings.
pub fn signed_area(pts: &[Vec2]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..n {
        a += cross2(pts[i], pts[(i + 1) % n]);
    }
    0.5 * a
}

/// Area centroid. `None` for (near) zero area rings.
pub fn centroid(pts: &[Vec2]) -> Option<Vec2> {
    let n = pts.len();
    if n < 3 {
        return None;
    }
    // Shift to the first vertex to keep large coordinates well conditioned.
    let o = pts[0];
    let mut a = 0.0;
    let mut c = Vec2::zeros();
    for i in 0..n {
        let p = pts[i] - o;
        let q = pts[(i + 1) % n] - o;
        let w = cross2(p, q);
        a += w;
        c += (p + q) * w;
    }
    if a.abs() < 1e-300 {
        return None;
    }
    Some(o + c / (3.0 * a))
}

/// Edge vectors `p[i+1] - p[i]`, including the closing edge.
pub fn edge_vectors(pts: &[Vec2]) -> Vec<Vec2> {
    let n = pts.len();
    (0..n).map(|i| pts[(i + 1) % n] - pts[i]).collect()
}

pub fn edge_lengths(pts: &[Vec2]) -> Vec<f64> {
    edge_vectors(pts).iter().map(|e| e.norm()).collect()
}

pub fn perimeter(pts: &[Vec2]) -> f64 {
    edge_lengths(pts).iter().sum()
}

/// Interior angle at every vertex, in `[0, 2π)`.
///
/// The unsigned angle between the adjacent edges comes from their dot
/// product; the winding (sign of the area) decides whether the vertex is
/// convex or reflex.
pub fn interior_angles(pts: &[Vec2]) -> Vec<f64> {
    let n = pts.len();
    let orient = signed_area(pts).signum();
    let tau = std::f64::consts::TAU;
    (0..n)
        .map(|i| {
            let prev = pts[i] - pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n] - pts[i];
            let denom = prev.norm() * next.norm();
            if denom <= 0.0 {
                return 0.0;
            }
            let turn_abs = (prev.dot(&next) / denom).clamp(-1.0, 1.0).acos();
            let turn = if cross2(prev, next) * orient >= 0.0 {
                turn_abs
            } else {
                -turn_abs
            };
            (std::f64::consts::PI - turn).rem_euclid(tau)
        })
        .collect()
}

/// Axis-aligned bounds `(min, max)`.
pub fn bounds(pts: &[Vec2]) -> (Vec2, Vec2) {
    let mut lo = Vec2::new(f64::INFINITY, f64::INFINITY);
    let mut hi = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in pts {
        lo = lo.inf(p);
        hi = hi.sup(p);
    }
    (lo, hi)
}

/// Largest vertex-to-vertex distance.
pub fn diameter(pts: &[Vec2]) -> f64 {
    let mut d2: f64 = 0.0;
    for (i, p) in pts.iter().enumerate() {
        for q in &pts[i + 1..] {
            d2 = d2.max((p - q).norm_squared());
        }
    }
    d2.sqrt()
}

#[inline]
fn dist_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Even-odd ray cast (strict interior only).
fn ray_cast(pts: &[Vec2], p: Vec2) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (pts[i], pts[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Point-in-polygon; points within `eps` of the boundary count as inside.
pub fn point_in_polygon(pts: &[Vec2], p: Vec2, eps: f64) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        if dist_to_segment(p, pts[i], pts[(i + 1) % n]) <= eps {
            return true;
        }
    }
    ray_cast(pts, p)
}

/// Distance to the boundary, positive inside and negative outside.
pub fn signed_distance(pts: &[Vec2], p: Vec2) -> f64 {
    let n = pts.len();
    let mut d = f64::INFINITY;
    for i in 0..n {
        d = d.min(dist_to_segment(p, pts[i], pts[(i + 1) % n]));
    }
    if ray_cast(pts, p) {
        d
    } else {
        -d
    }
}

/// Rotate every point by `angle` (radians, counter-clockwise) about `pivot`.
pub fn rotate(pts: &[Vec2], angle: f64, pivot: Vec2) -> Vec<Vec2> {
    let r = Rotation2::new(angle);
    pts.iter().map(|p| pivot + r * (p - pivot)).collect()
}

pub fn translate(pts: &[Vec2], t: Vec2) -> Vec<Vec2> {
    pts.iter().map(|p| p + t).collect()
}

/// Homothety `pivot + k (p - pivot)`.
pub fn scale_about(pts: &[Vec2], k: f64, pivot: Vec2) -> Vec<Vec2> {
    pts.iter().map(|p| pivot + (p - pivot) * k).collect()
}

/// Intersection point of closed segments `ab` and `cd`, if any.
///
/// Collinear overlapping segments report `None`; callers that care about
/// overlap use `segments_cross`.
pub fn segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let r = b - a;
    let s = d - c;
    let denom = cross2(r, s);
    if denom.abs() <= f64::EPSILON * r.norm() * s.norm() {
        return None;
    }
    let qp = c - a;
    let t = cross2(qp, s) / denom;
    let u = cross2(qp, r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a + r * t)
    } else {
        None
    }
}

/// Proper crossing test: the segments intersect at a single point interior
/// to both (more than `eps` away from every endpoint).
pub fn segments_cross(a: Vec2, b: Vec2, c: Vec2, d: Vec2, eps: f64) -> bool {
    let o1 = orient(a, b, c, eps);
    let o2 = orient(a, b, d, eps);
    let o3 = orient(c, d, a, eps);
    let o4 = orient(c, d, b, eps);
    o1 * o2 < 0 && o3 * o4 < 0
}

/// Sign of the turn `a → b → p` with an `eps` dead band on the distance of
/// `p` from line `ab`.
#[inline]
fn orient(a: Vec2, b: Vec2, p: Vec2, eps: f64) -> i8 {
    let ab = b - a;
    let len = ab.norm();
    if len <= 0.0 {
        return 0;
    }
    let dist = cross2(ab, p - a) / len;
    if dist > eps {
        1
    } else if dist < -eps {
        -1
    } else {
        0
    }
}

/// Clip the infinite line `origin + t·dir` against the polygon.
///
/// Returns the sorted parameter intervals `(t0, t1)` that lie inside. Uses a
/// half-open rule at vertices so a line through a vertex is counted once.
pub fn line_crossings(pts: &[Vec2], origin: Vec2, dir: Vec2) -> Vec<(f64, f64)> {
    let n = pts.len();
    let normal = Vec2::new(-dir.y, dir.x);
    let side: Vec<f64> = pts.iter().map(|p| normal.dot(&(p - origin))).collect();
    let mut ts: Vec<f64> = Vec::new();
    for i in 0..n {
        let j = (i + 1) % n;
        let (sa, sb) = (side[i], side[j]);
        if (sa > 0.0) != (sb > 0.0) {
            let f = sa / (sa - sb);
            let hit = pts[i] + (pts[j] - pts[i]) * f;
            ts.push(dir.dot(&(hit - origin)));
        }
    }
    ts.sort_by(|a, b| a.total_cmp(b));
    ts.chunks_exact(2).map(|w| (w[0], w[1])).collect()
}

/// True when every turn has the same orientation (collinear turns allowed).
pub fn is_convex(pts: &[Vec2]) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    let orient = signed_area(pts).signum();
    let scale = diameter(pts).max(f64::MIN_POSITIVE);
    (0..n).all(|i| {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        let c = pts[(i + 2) % n];
        cross2(b - a, c - b) * orient >= -1e-12 * scale * scale
    })
}
