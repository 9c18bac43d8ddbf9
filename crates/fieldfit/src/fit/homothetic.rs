use super::{FitCfg, Fitter, StrategyKind};
use crate::classify::ShapeTag;
use crate::geom::{shrink_into, ContainCheck, Polygon};
use crate::search::Candidate;

/// Scaled copy of a general boundary about its centroid.
///
/// Keeps a clearance of `margin` × the shorter bounding-box side. Only
/// applies to boundaries classified `general`; concave shapes whose centroid
/// is badly placed simply yield nothing.
#[derive(Clone, Copy, Debug)]
pub struct Homothetic(pub FitCfg);

impl Fitter for Homothetic {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Homothetic
    }

    fn attempt(&self, boundary: &Polygon) -> Option<Candidate> {
        let cfg = &self.0;
        super::outline_if(boundary, cfg, ShapeTag::General)?;
        let (lo, hi) = boundary.bounds();
        let extent = hi - lo;
        let clearance = cfg.margin * extent.x.min(extent.y);
        let chk = ContainCheck::with_clearance(clearance, boundary.eps(&cfg.geom));
        let region = shrink_into(boundary.points(), boundary.points(), boundary.centroid(), chk)?;
        Some(Candidate::new(0.0, region)).filter(|c| c.area > 0.0)
    }
}
