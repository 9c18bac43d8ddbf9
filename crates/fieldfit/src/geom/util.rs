use super::kernel::{cross2, signed_area};
use super::Vec2;

#[inline]
fn turn(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    cross2(b - a, c - a)
}

/// Andrew's monotone chain convex hull (returns hull in CCW order).
pub fn convex_hull(points: &[Vec2]) -> Option<Vec<Vec2>> {
    if points.len() < 3 {
        return None;
    }
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return None;
    }
    let mut lower: Vec<Vec2> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vec2> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    if hull.len() < 3 {
        None
    } else {
        Some(hull)
    }
}

/// Drop vertices whose turn is below `sin_tol` (relative), e.g. a mid-edge
/// vertex on a straight field side. Never reduces below three vertices.
pub fn simplify_collinear(pts: &[Vec2], sin_tol: f64) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = pts.to_vec();
    loop {
        let n = out.len();
        if n <= 3 {
            return out;
        }
        let flat = (0..n).find(|&i| {
            let prev = out[i] - out[(i + n - 1) % n];
            let next = out[(i + 1) % n] - out[i];
            let denom = prev.norm() * next.norm();
            denom > 0.0 && prev.dot(&next) > 0.0 && (cross2(prev, next) / denom).abs() <= sin_tol
        });
        match flat {
            Some(i) => {
                out.remove(i);
            }
            None => return out,
        }
    }
}

/// Offset every edge of a convex CCW polygon inward by `d` and intersect
/// consecutive offset lines.
///
/// Returns `None` when the offset collapses the polygon (an edge reverses
/// direction or the area vanishes).
pub fn inset_convex(pts: &[Vec2], d: f64) -> Option<Vec<Vec2>> {
    let n = pts.len();
    if n < 3 || signed_area(pts) <= 0.0 {
        return None;
    }
    let mut lines: Vec<(Vec2, Vec2)> = Vec::with_capacity(n);
    for i in 0..n {
        let a = pts[i];
        let e = pts[(i + 1) % n] - a;
        let len = e.norm();
        if len <= 0.0 {
            return None;
        }
        let inward = Vec2::new(-e.y, e.x) / len;
        lines.push((a + inward * d, e));
    }
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let (p, r) = lines[(i + n - 1) % n];
        let (q, s) = lines[i];
        let denom = cross2(r, s);
        if denom.abs() <= 1e-15 * r.norm() * s.norm() {
            return None;
        }
        let t = cross2(q - p, s) / denom;
        out.push(p + r * t);
    }
    for i in 0..n {
        let e_new = out[(i + 1) % n] - out[i];
        let e_old = pts[(i + 1) % n] - pts[i];
        if e_new.dot(&e_old) <= 0.0 {
            return None;
        }
    }
    if signed_area(&out) <= 0.0 {
        return None;
    }
    Some(out)
}
