//! Parallel coverage passes over a working region.
//!
//! The sweep runs parallel to the longest edge (the base for triangles, the
//! longest convex-hull edge for general shapes). Pass `k` sits at the centre
//! of strip `k` of width `work_width` across the region, so consecutive passes
//! are exactly `work_width` apart; only the last strip may be narrower, and
//! its pass sits at that strip's centre. Each pass is clipped to the region,
//! one `WorkPath` per inside interval.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::ShapeTag;
use crate::error::{InscribeError, Result};
use crate::geom::{convex_hull, edge_vectors, line_crossings, Polygon, Vec2};

/// One straight pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkPath {
    pub start: Vec2,
    pub end: Vec2,
}

impl WorkPath {
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Total length of all passes (turns between passes excluded).
pub fn plan_length(paths: &[WorkPath]) -> f64 {
    paths.iter().map(WorkPath::length).sum()
}

/// Coverage passes over `polygon`, ordered by lateral offset.
pub fn generate_paths(polygon: &[Vec2], work_width: f64, shape: ShapeTag) -> Result<Vec<WorkPath>> {
    if !(work_width.is_finite() && work_width > 0.0) {
        return Err(InscribeError::config(format!(
            "work_width must be finite and > 0, got {work_width}"
        )));
    }
    let region = Polygon::new(polygon.to_vec())?;
    let dir = sweep_direction(&region, shape)?;
    let normal = Vec2::new(-dir.y, dir.x);
    let pts = region.points();

    let (smin, smax) = pts
        .iter()
        .map(|p| normal.dot(p))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s), hi.max(s))
        });
    let offsets = strip_centres(smin, smax, work_width);

    let eps = 1e-9 * region.diameter();
    let mut paths = Vec::new();
    for &s in &offsets {
        let origin = normal * s;
        for (t0, t1) in line_crossings(pts, origin, dir) {
            if t1 - t0 > eps {
                paths.push(WorkPath {
                    start: origin + dir * t0,
                    end: origin + dir * t1,
                });
            }
        }
    }
    debug!(
        shape = %shape,
        work_width,
        passes = offsets.len(),
        paths = paths.len(),
        "coverage_paths"
    );
    Ok(paths)
}

/// Unit sweep direction for a region of the given family.
fn sweep_direction(region: &Polygon, shape: ShapeTag) -> Result<Vec2> {
    let hull;
    let ring: &[Vec2] = match shape {
        ShapeTag::General => {
            hull = convex_hull(region.points())
                .ok_or_else(|| InscribeError::invalid("region has a degenerate hull"))?;
            &hull
        }
        _ => region.points(),
    };
    let mut best = Vec2::zeros();
    for e in edge_vectors(ring) {
        if e.norm() > best.norm() {
            best = e;
        }
    }
    let len = best.norm();
    if len <= 0.0 {
        return Err(InscribeError::invalid("region has no edge of positive length"));
    }
    Ok(best / len)
}

/// Centres of consecutive `w`-wide strips covering `[smin, smax]`; the last
/// strip is clipped to `smax`.
fn strip_centres(smin: f64, smax: f64, w: f64) -> Vec<f64> {
    let extent = smax - smin;
    if extent <= w {
        return vec![smin + 0.5 * extent];
    }
    let n = (extent / w).ceil() as usize;
    let mut out: Vec<f64> = (0..n - 1).map(|k| smin + (k as f64 + 0.5) * w).collect();
    let last_lo = smin + (n - 1) as f64 * w;
    out.push(0.5 * (last_lo + smax));
    out
}
