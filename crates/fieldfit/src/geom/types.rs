//! Validated boundary polygon and the tolerances it is checked against.
//!
//! - `GeomCfg`: centralizes relative epsilons (scaled by the polygon diameter).
//! - `Polygon`: simple, counter-clockwise, de-duplicated ring with ≥3 vertices.

use serde::{Deserialize, Serialize};

use super::kernel::{self, cross2};
use super::Vec2;
use crate::error::{InscribeError, Result};

/// Geometry tolerances, relative to the polygon diameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomCfg {
    /// Distance below which points are considered coincident / on the boundary.
    pub eps_rel: f64,
    /// Minimum |area| / diameter² for a non-degenerate boundary.
    pub min_area_rel: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_rel: 1e-9,
            min_area_rel: 1e-9,
        }
    }
}

/// Simple polygon, stored counter-clockwise, implicitly closed.
///
/// Invariants:
/// - At least three vertices, no consecutive duplicates (closing one included).
/// - Non-zero area relative to its diameter.
/// - No two non-adjacent edges touch or cross.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec2>", into = "Vec<Vec2>")]
pub struct Polygon {
    pts: Vec<Vec2>,
    diameter: f64,
}

impl TryFrom<Vec<Vec2>> for Polygon {
    type Error = InscribeError;

    fn try_from(points: Vec<Vec2>) -> Result<Self> {
        Polygon::new(points)
    }
}

impl From<Polygon> for Vec<Vec2> {
    fn from(p: Polygon) -> Self {
        p.pts
    }
}

impl Polygon {
    /// Validate with default tolerances.
    pub fn new(points: Vec<Vec2>) -> Result<Self> {
        Self::with_cfg(points, GeomCfg::default())
    }

    /// Convenience for literal coordinates.
    pub fn from_xy(points: &[(f64, f64)]) -> Result<Self> {
        Self::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    /// Validate `points` as a field boundary: fails fast, never repairs beyond
    /// dropping repeated consecutive vertices and fixing the winding.
    pub fn with_cfg(points: Vec<Vec2>, cfg: GeomCfg) -> Result<Self> {
        if let Some(p) = points.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(InscribeError::invalid(format!(
                "non-finite vertex ({}, {})",
                p.x, p.y
            )));
        }
        let diameter = kernel::diameter(&points);
        let eps = cfg.eps_rel * diameter;
        let mut pts: Vec<Vec2> = Vec::with_capacity(points.len());
        for p in points {
            if pts.last().is_none_or(|q| (p - q).norm() > eps) {
                pts.push(p);
            }
        }
        while pts.len() > 1 && (pts[0] - pts[pts.len() - 1]).norm() <= eps {
            pts.pop();
        }
        if pts.len() < 3 {
            return Err(InscribeError::invalid(format!(
                "need at least 3 distinct vertices, got {}",
                pts.len()
            )));
        }
        let area = kernel::signed_area(&pts);
        if area.abs() <= cfg.min_area_rel * diameter * diameter {
            return Err(InscribeError::invalid(format!(
                "degenerate boundary (area {area:.3e})"
            )));
        }
        if let Some((i, j)) = first_self_intersection(&pts, eps) {
            return Err(InscribeError::invalid(format!(
                "self-intersecting boundary (edges {i} and {j})"
            )));
        }
        if area < 0.0 {
            pts.reverse();
        }
        Ok(Self { pts, diameter })
    }

    /// Wrap an already valid CCW ring (rigid motions and homotheties of a
    /// valid polygon stay valid).
    pub(crate) fn from_valid(pts: Vec<Vec2>) -> Self {
        let diameter = kernel::diameter(&pts);
        Self { pts, diameter }
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.pts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn into_points(self) -> Vec<Vec2> {
        self.pts
    }

    /// Unsigned area (the ring is stored CCW).
    pub fn area(&self) -> f64 {
        kernel::signed_area(&self.pts)
    }

    pub fn centroid(&self) -> Vec2 {
        kernel::centroid(&self.pts).unwrap_or_else(|| vertex_mean(&self.pts))
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn perimeter(&self) -> f64 {
        kernel::perimeter(&self.pts)
    }

    pub fn bounds(&self) -> (Vec2, Vec2) {
        kernel::bounds(&self.pts)
    }

    /// Absolute boundary tolerance for this polygon.
    #[inline]
    pub fn eps(&self, cfg: &GeomCfg) -> f64 {
        cfg.eps_rel * self.diameter
    }

    pub fn contains_point(&self, p: Vec2, cfg: &GeomCfg) -> bool {
        kernel::point_in_polygon(&self.pts, p, self.eps(cfg))
    }

    pub fn signed_distance(&self, p: Vec2) -> f64 {
        kernel::signed_distance(&self.pts, p)
    }

    pub fn is_convex(&self) -> bool {
        kernel::is_convex(&self.pts)
    }

    pub fn rotated(&self, angle: f64, pivot: Vec2) -> Polygon {
        Polygon::from_valid(kernel::rotate(&self.pts, angle, pivot))
    }

    pub fn translated(&self, t: Vec2) -> Polygon {
        Polygon::from_valid(kernel::translate(&self.pts, t))
    }
}

fn vertex_mean(pts: &[Vec2]) -> Vec2 {
    pts.iter().fold(Vec2::zeros(), |acc, p| acc + p) / pts.len().max(1) as f64
}

/// First pair of non-adjacent edges that touch or cross, plus adjacent edges
/// that fold back onto each other.
fn first_self_intersection(pts: &[Vec2], eps: f64) -> Option<(usize, usize)> {
    let n = pts.len();
    for i in 0..n {
        let (a, b) = (pts[i], pts[(i + 1) % n]);
        for j in (i + 1)..n {
            let (c, d) = (pts[j], pts[(j + 1) % n]);
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                // Shared vertex; reject only a fold-back (antiparallel overlap).
                let (e1, e2) = if j == i + 1 { (b - a, d - c) } else { (d - c, b - a) };
                let denom = e1.norm() * e2.norm();
                if denom > 0.0 && cross2(e1, e2).abs() <= 1e-12 * denom && e1.dot(&e2) < 0.0 {
                    return Some((i, j));
                }
                continue;
            }
            if segments_touch(a, b, c, d, eps) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Closed-segment intersection with tolerance (touching counts).
fn segments_touch(a: Vec2, b: Vec2, c: Vec2, d: Vec2, eps: f64) -> bool {
    if kernel::segment_intersection(a, b, c, d).is_some() {
        return true;
    }
    let near = |p: Vec2, s0: Vec2, s1: Vec2| {
        let s = s1 - s0;
        let len2 = s.norm_squared();
        let t = if len2 > 0.0 {
            ((p - s0).dot(&s) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (p - (s0 + s * t)).norm() <= eps
    };
    near(a, c, d) || near(b, c, d) || near(c, a, b) || near(d, a, b)
}
