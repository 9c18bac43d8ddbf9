//! Inscribed-region strategies behind one interface.
//!
//! Purpose
//! - Turn a validated boundary into at most one `Candidate` per strategy.
//! - Shape fitters build a polygon of the boundary's own family directly from
//!   its geometry; the rotated-rectangle strategy wraps the raster search.
//!
//! Why this design
//! - Every strategy implements `Fitter::attempt(boundary) -> Option<Candidate>`.
//!   `None` means "not applicable here"; the orchestrator falls back.
//! - Shape fitters re-derive the simplified outline themselves and bail out
//!   unless it has their tag, so they are safe to call on any boundary.
//! - Every returned polygon has passed a containment check against the
//!   original (unsimplified) boundary.
//!
//! Code cross-refs: `classify_outline`, `shrink_into`, `search::search`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{classify_outline, ClassifyCfg, ShapeTag};
use crate::geom::{shrink_into, ContainCheck, GeomCfg, Polygon, Vec2};
use crate::search::{normalize_half_turn, search, Candidate, SearchCfg};

mod homothetic;
mod quad;
mod triangle;

pub use homothetic::Homothetic;
pub use quad::{ParallelogramInset, RectangleInset, TrapezoidInset};
pub use triangle::TriangleScaled;

/// Identifier of the strategy that produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    RectangleInset,
    ParallelogramInset,
    TrapezoidInset,
    TriangleScaled,
    Homothetic,
    RotatedRectangle,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::RectangleInset => "rectangle_inset",
            StrategyKind::ParallelogramInset => "parallelogram_inset",
            StrategyKind::TrapezoidInset => "trapezoid_inset",
            StrategyKind::TriangleScaled => "triangle_scaled",
            StrategyKind::Homothetic => "homothetic",
            StrategyKind::RotatedRectangle => "rotated_rectangle",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One way of producing an inscribed region.
pub trait Fitter {
    fn kind(&self) -> StrategyKind;

    /// Best region this strategy finds inside `boundary`, or `None` if the
    /// strategy does not apply or produced nothing contained.
    fn attempt(&self, boundary: &Polygon) -> Option<Candidate>;
}

/// Parameters shared by the shape fitters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitCfg {
    /// Safety margin as a fraction of the relevant shape dimension, `[0, 0.5)`.
    pub margin: f64,
    pub classify: ClassifyCfg,
    pub geom: GeomCfg,
}

impl Default for FitCfg {
    fn default() -> Self {
        Self {
            margin: 0.01,
            classify: ClassifyCfg::default(),
            geom: GeomCfg::default(),
        }
    }
}

/// The shape fitter for `tag`, if there is one.
pub fn shape_fitter(tag: ShapeTag, cfg: FitCfg) -> Option<Box<dyn Fitter>> {
    match tag {
        ShapeTag::Rectangle => Some(Box::new(RectangleInset(cfg))),
        ShapeTag::Parallelogram => Some(Box::new(ParallelogramInset(cfg))),
        ShapeTag::Trapezoid => Some(Box::new(TrapezoidInset(cfg))),
        ShapeTag::Triangle => Some(Box::new(TriangleScaled::new(cfg))),
        ShapeTag::General => None,
    }
}

/// Generic raster search as a strategy.
#[derive(Clone, Copy, Debug)]
pub struct RotatedRectangle {
    pub search: SearchCfg,
    pub geom: GeomCfg,
}

impl Fitter for RotatedRectangle {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RotatedRectangle
    }

    fn attempt(&self, boundary: &Polygon) -> Option<Candidate> {
        search(boundary, &self.search, &self.geom)
    }
}

/// Simplified outline of `boundary` if it classifies as `want`.
pub(crate) fn outline_if(boundary: &Polygon, cfg: &FitCfg, want: ShapeTag) -> Option<Polygon> {
    let (tag, outline) = classify_outline(boundary, &cfg.classify);
    (tag == want).then_some(outline)
}

/// Final step of every shape fitter: make `region` fit the original boundary
/// (shrinking toward its centre if the simplified outline differed) and wrap
/// it as a candidate oriented along its first edge.
pub(crate) fn finish(boundary: &Polygon, region: Vec<Vec2>, geom: &GeomCfg) -> Option<Candidate> {
    let n = region.len();
    if n < 3 {
        return None;
    }
    let centre = region.iter().fold(Vec2::zeros(), |acc, p| acc + p) / n as f64;
    let chk = ContainCheck::touching(boundary.eps(geom));
    let fitted = shrink_into(boundary.points(), &region, centre, chk)?;
    let e = fitted[1] - fitted[0];
    let angle = normalize_half_turn(e.y.atan2(e.x).to_degrees());
    let cand = Candidate::new(angle, fitted);
    (cand.area > 0.0).then_some(cand)
}
