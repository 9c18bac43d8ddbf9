//! Strategy orchestrator: classify, dispatch, keep the largest region.
//!
//! Flow
//! - Classify the boundary (on its simplified outline).
//! - Build the strategy stages. With `try_multiple_strategies` there is a
//!   single stage holding the shape fitter (if any), the rotated-rectangle
//!   search and, for general shapes, the homothetic fitter. Without it the
//!   shape fitter runs alone and the search is the fallback stage.
//! - Within a stage the largest candidate wins; ties keep the earlier
//!   strategy. The first stage that produces anything ends the run.
//! - The winner is re-checked for containment (vertices plus dense edge
//!   samples). A failure there is a defect and is returned as an error,
//!   never clipped.
//!
//! Each call owns all of its state, so independent boundaries can be
//! processed concurrently without coordination.

mod types;

pub use types::{InscribeCfg, InscribedResult};

use tracing::{debug, error, info, warn};

use crate::classify::{classify_outline, ShapeTag};
use crate::error::{InscribeError, Result};
use crate::fit::{shape_fitter, Fitter, Homothetic, RotatedRectangle, StrategyKind};
use crate::geom::{containment_violation, ContainCheck, GeomCfg, Polygon, Vec2};
use crate::search::Candidate;

/// Interior samples per edge in the final containment check.
const FINAL_EDGE_SAMPLES: usize = 32;

/// Largest working region inside `boundary`.
///
/// Errors: `InvalidConfig` for out-of-range parameters, `NoCandidateFound`
/// when every strategy came back empty, `ContainmentViolation` if the
/// winning polygon leaves the boundary.
pub fn smart_inscribe(boundary: &Polygon, cfg: &InscribeCfg) -> Result<InscribedResult> {
    cfg.validate()?;
    let (shape, outline) = classify_outline(boundary, &cfg.classify);
    debug!(
        shape = %shape,
        vertices = boundary.len(),
        outline_vertices = outline.len(),
        "classified"
    );

    let stages = plan(shape, cfg);
    let mut tried: Vec<StrategyKind> = Vec::new();
    let mut winner: Option<(StrategyKind, Candidate)> = None;
    for stage in &stages {
        for fitter in stage {
            let kind = fitter.kind();
            tried.push(kind);
            match fitter.attempt(boundary) {
                Some(c) => {
                    debug!(strategy = %kind, area = c.area, angle = c.angle_deg, "attempt");
                    if winner.as_ref().is_none_or(|(_, w)| c.area > w.area) {
                        winner = Some((kind, c));
                    }
                }
                None => warn!(strategy = %kind, shape = %shape, "strategy produced no region"),
            }
        }
        if winner.is_some() {
            break;
        }
        debug!(shape = %shape, "falling back to next stage");
    }

    let Some((strategy, best)) = winner else {
        return Err(InscribeError::NoCandidateFound {
            angle_step_deg: cfg.angle_step_deg,
            resolution: cfg.resolution,
            strategies: tried
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        });
    };

    verify_contained(boundary, strategy, &best, &cfg.geom)?;

    let coverage = (best.area / boundary.area()).min(1.0);
    let result = InscribedResult {
        polygon: best.polygon,
        shape_type: shape,
        area: best.area,
        coverage,
        strategy,
    };
    info!(
        shape = %result.shape_type,
        strategy = %result.strategy,
        area = result.area,
        coverage = result.coverage,
        "inscribed"
    );
    Ok(result)
}

/// Validate raw vertices with `cfg.geom`, then run `smart_inscribe`.
pub fn smart_inscribe_points(points: Vec<Vec2>, cfg: &InscribeCfg) -> Result<InscribedResult> {
    cfg.validate()?;
    let boundary = Polygon::with_cfg(points, cfg.geom)?;
    smart_inscribe(&boundary, cfg)
}

/// Final gate on the winning region: vertices plus dense edge samples
/// against the boundary itself, no clearance.
pub(crate) fn verify_contained(
    boundary: &Polygon,
    strategy: StrategyKind,
    cand: &Candidate,
    geom: &GeomCfg,
) -> Result<()> {
    let chk = ContainCheck {
        clearance: 0.0,
        eps: boundary.eps(geom),
        edge_samples: FINAL_EDGE_SAMPLES,
    };
    match containment_violation(boundary.points(), &cand.polygon, chk) {
        None => Ok(()),
        Some(detail) => {
            error!(strategy = %strategy, %detail, "region leaves the boundary");
            Err(InscribeError::ContainmentViolation {
                strategy: strategy.to_string(),
                detail,
            })
        }
    }
}

fn plan(shape: ShapeTag, cfg: &InscribeCfg) -> Vec<Vec<Box<dyn Fitter>>> {
    let fit = cfg.fit();
    let rotated: Box<dyn Fitter> = Box::new(RotatedRectangle {
        search: cfg.search(),
        geom: cfg.geom,
    });
    let own = shape_fitter(shape, fit);
    if cfg.try_multiple_strategies {
        let mut stage: Vec<Box<dyn Fitter>> = own.into_iter().collect();
        stage.push(rotated);
        if shape == ShapeTag::General {
            stage.push(Box::new(Homothetic(fit)));
        }
        vec![stage]
    } else {
        match own {
            Some(f) => vec![vec![f], vec![rotated]],
            None => vec![vec![rotated]],
        }
    }
}
