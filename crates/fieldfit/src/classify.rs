//! Shape classification of field boundaries.
//!
//! Assigns one of {rectangle, parallelogram, trapezoid, triangle, general}
//! from edge-direction and edge-length patterns. All tests are relative
//! (sines of angles, fractions of the mean edge length), so the tag does not
//! change under rotation, translation or uniform scaling. Anything ambiguous
//! degrades to `General`; classification never fails.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{cross2, edge_vectors, simplify_collinear, Polygon, Vec2};

/// Shape family of a boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTag {
    Rectangle,
    Parallelogram,
    Trapezoid,
    Triangle,
    General,
}

impl ShapeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeTag::Rectangle => "rectangle",
            ShapeTag::Parallelogram => "parallelogram",
            ShapeTag::Trapezoid => "trapezoid",
            ShapeTag::Triangle => "triangle",
            ShapeTag::General => "general",
        }
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification tolerances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyCfg {
    /// Max angle (degrees) between directions still called parallel, and max
    /// deviation from 90° still called a right angle.
    pub angle_tol_deg: f64,
    /// Max length difference of opposite sides, as a fraction of the mean edge.
    pub length_tol: f64,
}

impl Default for ClassifyCfg {
    fn default() -> Self {
        Self {
            angle_tol_deg: 2.0,
            length_tol: 0.02,
        }
    }
}

impl ClassifyCfg {
    #[inline]
    pub(crate) fn sin_tol(&self) -> f64 {
        self.angle_tol_deg.to_radians().sin().abs()
    }
}

/// Classify a boundary.
pub fn classify(poly: &Polygon, cfg: &ClassifyCfg) -> ShapeTag {
    classify_outline(poly, cfg).0
}

/// Classify and return the outline the tag refers to (near-collinear
/// vertices removed). Fitters work on this outline.
pub fn classify_outline(poly: &Polygon, cfg: &ClassifyCfg) -> (ShapeTag, Polygon) {
    let simplified = simplify_collinear(poly.points(), cfg.sin_tol());
    let outline = if simplified.len() == poly.len() {
        poly.clone()
    } else {
        Polygon::new(simplified).unwrap_or_else(|_| poly.clone())
    };
    (classify_points(outline.points(), cfg), outline)
}

fn classify_points(pts: &[Vec2], cfg: &ClassifyCfg) -> ShapeTag {
    match pts.len() {
        3 => ShapeTag::Triangle,
        4 => classify_quad(pts, cfg),
        _ => ShapeTag::General,
    }
}

fn classify_quad(pts: &[Vec2], cfg: &ClassifyCfg) -> ShapeTag {
    let e = edge_vectors(pts);
    let lens: Vec<f64> = e.iter().map(|v| v.norm()).collect();
    let mean = lens.iter().sum::<f64>() / 4.0;
    if mean <= 0.0 {
        return ShapeTag::General;
    }
    let sin_tol = cfg.sin_tol();
    let p02 = parallel(e[0], e[2], sin_tol);
    let p13 = parallel(e[1], e[3], sin_tol);
    match (p02, p13) {
        (true, true) => {
            let tol = cfg.length_tol * mean;
            let equal = (lens[0] - lens[2]).abs() <= tol && (lens[1] - lens[3]).abs() <= tol;
            if !equal {
                return ShapeTag::Trapezoid;
            }
            let right = (0..4).all(|i| perpendicular(e[i], e[(i + 1) % 4], sin_tol));
            if right {
                ShapeTag::Rectangle
            } else {
                ShapeTag::Parallelogram
            }
        }
        (true, false) | (false, true) => ShapeTag::Trapezoid,
        (false, false) => ShapeTag::General,
    }
}

/// |sin| of the angle between two directions (0 = parallel).
#[inline]
fn sin_between(u: Vec2, v: Vec2) -> f64 {
    let denom = u.norm() * v.norm();
    if denom <= 0.0 {
        return 1.0;
    }
    (cross2(u, v) / denom).abs()
}

#[inline]
fn parallel(u: Vec2, v: Vec2, sin_tol: f64) -> bool {
    sin_between(u, v) <= sin_tol
}

#[inline]
fn perpendicular(u: Vec2, v: Vec2, sin_tol: f64) -> bool {
    let denom = u.norm() * v.norm();
    denom > 0.0 && (u.dot(&v) / denom).abs() <= sin_tol
}

/// Index of the first edge of the more parallel pair of opposite sides of a
/// quadrilateral (0 for edges 0/2, 1 for edges 1/3).
pub(crate) fn parallel_pair(pts: &[Vec2]) -> usize {
    let e = edge_vectors(pts);
    if sin_between(e[0], e[2]) <= sin_between(e[1], e[3]) {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(xy: &[(f64, f64)]) -> ShapeTag {
        classify(&Polygon::from_xy(xy).unwrap(), &ClassifyCfg::default())
    }

    #[test]
    fn basic_families() {
        assert_eq!(
            tag(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)]),
            ShapeTag::Rectangle
        );
        assert_eq!(
            tag(&[(0.0, 0.0), (100.0, 0.0), (120.0, 50.0), (20.0, 50.0)]),
            ShapeTag::Parallelogram
        );
        assert_eq!(
            tag(&[(0.0, 0.0), (100.0, 0.0), (80.0, 50.0), (20.0, 50.0)]),
            ShapeTag::Trapezoid
        );
        assert_eq!(
            tag(&[(50.0, 0.0), (100.0, 100.0), (0.0, 100.0)]),
            ShapeTag::Triangle
        );
        assert_eq!(
            tag(&[(0.0, 0.0), (100.0, 10.0), (90.0, 70.0), (-10.0, 40.0)]),
            ShapeTag::General
        );
        assert_eq!(
            tag(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 3.0), (0.0, 2.0)]),
            ShapeTag::General
        );
    }

    #[test]
    fn clockwise_input_same_tag() {
        assert_eq!(
            tag(&[(0.0, 50.0), (100.0, 50.0), (100.0, 0.0), (0.0, 0.0)]),
            ShapeTag::Rectangle
        );
    }

    #[test]
    fn mid_edge_vertex_is_ignored() {
        assert_eq!(
            tag(&[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)]),
            ShapeTag::Rectangle
        );
    }

    #[test]
    fn small_noise_is_tolerated() {
        // ~0.3° skew on one side still reads as a rectangle.
        assert_eq!(
            tag(&[(0.0, 0.0), (100.0, 0.0), (100.25, 50.0), (0.0, 50.0)]),
            ShapeTag::Rectangle
        );
    }

    #[test]
    fn parallel_pair_picks_bases() {
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(7.0, 4.0),
            Vec2::new(2.0, 4.0),
        ];
        assert_eq!(parallel_pair(&pts), 0);
        let rotated: Vec<Vec2> = pts.iter().cycle().skip(1).take(4).copied().collect();
        assert_eq!(parallel_pair(&rotated), 1);
    }

    #[test]
    fn tag_serializes_lowercase() {
        let s = serde_json::to_string(&ShapeTag::Parallelogram).unwrap();
        assert_eq!(s, "\"parallelogram\"");
    }
}
