//! Closed-form fitters for the quadrilateral families.

use tracing::trace;

use super::{finish, outline_if, FitCfg, Fitter, StrategyKind};
use crate::classify::{parallel_pair, ShapeTag};
use crate::geom::{cross2, edge_lengths, inset_convex, is_convex, scale_about, Polygon};
use crate::search::Candidate;

/// Inset every side of a rectangle by `margin` × its shorter side.
#[derive(Clone, Copy, Debug)]
pub struct RectangleInset(pub FitCfg);

impl Fitter for RectangleInset {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RectangleInset
    }

    fn attempt(&self, boundary: &Polygon) -> Option<Candidate> {
        let cfg = &self.0;
        let outline = outline_if(boundary, cfg, ShapeTag::Rectangle)?;
        let short = edge_lengths(outline.points())
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        let d = cfg.margin * short;
        trace!(short, inset = d, "rectangle_inset");
        let region = inset_convex(outline.points(), d)?;
        finish(boundary, region, &cfg.geom)
    }
}

/// Shrink a parallelogram toward its centroid by `1 - 2·margin`, keeping both
/// edge directions.
#[derive(Clone, Copy, Debug)]
pub struct ParallelogramInset(pub FitCfg);

impl Fitter for ParallelogramInset {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ParallelogramInset
    }

    fn attempt(&self, boundary: &Polygon) -> Option<Candidate> {
        let cfg = &self.0;
        let outline = outline_if(boundary, cfg, ShapeTag::Parallelogram)?;
        let k = 1.0 - 2.0 * cfg.margin;
        if k <= 0.0 {
            return None;
        }
        // Uniform scaling about the centroid moves each pair of sides inward
        // by the same fraction of the distance between them.
        let region = scale_about(outline.points(), k, outline.centroid());
        finish(boundary, region, &cfg.geom)
    }
}

/// Inset a trapezoid by `margin` × the distance between its parallel sides.
///
/// Offsetting every side by the same distance keeps the bases parallel and
/// shortens the legs in proportion to their taper.
#[derive(Clone, Copy, Debug)]
pub struct TrapezoidInset(pub FitCfg);

impl Fitter for TrapezoidInset {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TrapezoidInset
    }

    fn attempt(&self, boundary: &Polygon) -> Option<Candidate> {
        let cfg = &self.0;
        let outline = outline_if(boundary, cfg, ShapeTag::Trapezoid)?;
        let pts = outline.points();
        if !is_convex(pts) {
            return None;
        }
        let i = parallel_pair(pts);
        let base = pts[i + 1] - pts[i];
        let len = base.norm();
        if len <= 0.0 {
            return None;
        }
        let height = (cross2(base, pts[i + 2] - pts[i]) / len).abs();
        let d = cfg.margin * height;
        trace!(bases = i, height, inset = d, "trapezoid_inset");
        let region = inset_convex(pts, d)?;
        finish(boundary, region, &cfg.geom)
    }
}
