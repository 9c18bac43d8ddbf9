//! Polygon-in-polygon containment with an optional clearance.
//!
//! A simple inner ring lies inside a simple outer ring iff all inner vertices
//! are inside, no inner edge properly crosses an outer edge, and no outer
//! vertex pokes into the inner interior. Edge samples are checked on top of
//! that so a clearance is enforced along the edges too.

use super::kernel::{scale_about, segments_cross, signed_distance};
use super::Vec2;

/// Parameters for a containment check.
#[derive(Clone, Copy, Debug)]
pub struct ContainCheck {
    /// Required distance from the outer boundary (0 = touching allowed).
    pub clearance: f64,
    /// Absolute numeric slack.
    pub eps: f64,
    /// Interior samples per inner edge (0 disables sampling).
    pub edge_samples: usize,
}

impl ContainCheck {
    pub fn touching(eps: f64) -> Self {
        Self {
            clearance: 0.0,
            eps,
            edge_samples: 8,
        }
    }

    pub fn with_clearance(clearance: f64, eps: f64) -> Self {
        Self {
            clearance,
            eps,
            edge_samples: 4,
        }
    }
}

/// First reason `inner` is not inside `outer`, or `None` if it is.
pub fn containment_violation(outer: &[Vec2], inner: &[Vec2], chk: ContainCheck) -> Option<String> {
    if inner.len() < 3 {
        return Some(format!("inner ring has {} vertices", inner.len()));
    }
    let floor = chk.clearance - chk.eps;
    for (i, &v) in inner.iter().enumerate() {
        let d = signed_distance(outer, v);
        if d < floor {
            return Some(format!(
                "vertex {i} ({:.6}, {:.6}) at distance {d:.6} (required {:.6})",
                v.x, v.y, chk.clearance
            ));
        }
    }
    let m = inner.len();
    let n = outer.len();
    for i in 0..m {
        let (a, b) = (inner[i], inner[(i + 1) % m]);
        for j in 0..n {
            let (c, d) = (outer[j], outer[(j + 1) % n]);
            if segments_cross(a, b, c, d, chk.eps) {
                return Some(format!("edge {i} crosses boundary edge {j}"));
            }
        }
        for k in 1..=chk.edge_samples {
            let t = k as f64 / (chk.edge_samples + 1) as f64;
            let p = a + (b - a) * t;
            let d = signed_distance(outer, p);
            if d < floor {
                return Some(format!("edge {i} sample t={t:.3} at distance {d:.6}"));
            }
        }
    }
    for (j, &w) in outer.iter().enumerate() {
        if signed_distance(inner, w) > chk.eps {
            return Some(format!("boundary vertex {j} lies inside the region"));
        }
    }
    None
}

#[inline]
pub fn contains_polygon(outer: &[Vec2], inner: &[Vec2], chk: ContainCheck) -> bool {
    containment_violation(outer, inner, chk).is_none()
}

/// Shrink `region` toward `pivot` until it passes `chk` against `outer`.
///
/// Tries the region as is, then binary-searches the scale factor in
/// `[0.5, 1]` (at most 30 halvings, stopping once the bracket is below 1e-3).
/// Returns the largest passing scaled copy, or `None` if even half size fails.
pub fn shrink_into(
    outer: &[Vec2],
    region: &[Vec2],
    pivot: Vec2,
    chk: ContainCheck,
) -> Option<Vec<Vec2>> {
    if contains_polygon(outer, region, chk) {
        return Some(region.to_vec());
    }
    let (mut lo, mut hi) = (0.5_f64, 1.0_f64);
    let mut best: Option<Vec<Vec2>> = None;
    for _ in 0..30 {
        let mid = 0.5 * (lo + hi);
        let trial = scale_about(region, mid, pivot);
        if contains_polygon(outer, &trial, chk) {
            best = Some(trial);
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < 1e-3 {
            break;
        }
    }
    best
}
