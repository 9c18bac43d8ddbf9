//! Orchestrator configuration and result value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{ClassifyCfg, ShapeTag};
use crate::error::{InscribeError, Result};
use crate::fit::{FitCfg, StrategyKind};
use crate::geom::{GeomCfg, Vec2};
use crate::search::SearchCfg;

/// Parameters of one `smart_inscribe` call.
///
/// Plain immutable value; every call receives its own copy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InscribeCfg {
    /// Degrees between sampled rotation angles, `(0, 180]`.
    pub angle_step_deg: f64,
    /// Grid cells along the longer side for the raster search.
    pub resolution: usize,
    /// Run every applicable strategy and keep the largest result.
    pub try_multiple_strategies: bool,
    /// Shape fitter safety margin, `[0, 0.5)`.
    pub margin: f64,
    pub classify: ClassifyCfg,
    pub geom: GeomCfg,
}

impl Default for InscribeCfg {
    fn default() -> Self {
        Self {
            angle_step_deg: 1.0,
            resolution: 1000,
            try_multiple_strategies: true,
            margin: 0.01,
            classify: ClassifyCfg::default(),
            geom: GeomCfg::default(),
        }
    }
}

impl InscribeCfg {
    pub fn with_angle_step(mut self, deg: f64) -> Self {
        self.angle_step_deg = deg;
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_multiple_strategies(mut self, on: bool) -> Self {
        self.try_multiple_strategies = on;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_classify(mut self, classify: ClassifyCfg) -> Self {
        self.classify = classify;
        self
    }

    pub fn with_geom(mut self, geom: GeomCfg) -> Self {
        self.geom = geom;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let step = self.angle_step_deg;
        if !(step.is_finite() && step > 0.0 && step <= 180.0) {
            return Err(InscribeError::config(format!(
                "angle_step_deg must be in (0, 180], got {step}"
            )));
        }
        if self.resolution < 2 {
            return Err(InscribeError::config(format!(
                "resolution must be at least 2, got {}",
                self.resolution
            )));
        }
        if !(self.margin.is_finite() && (0.0..0.5).contains(&self.margin)) {
            return Err(InscribeError::config(format!(
                "margin must be in [0, 0.5), got {}",
                self.margin
            )));
        }
        let tol = self.classify.angle_tol_deg;
        if !(tol.is_finite() && (0.0..45.0).contains(&tol)) {
            return Err(InscribeError::config(format!(
                "classify.angle_tol_deg must be in [0, 45), got {tol}"
            )));
        }
        if !(self.classify.length_tol.is_finite() && self.classify.length_tol >= 0.0) {
            return Err(InscribeError::config("classify.length_tol must be >= 0"));
        }
        let g = self.geom;
        let tol_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !(tol_ok(g.eps_rel) && tol_ok(g.min_area_rel)) {
            return Err(InscribeError::config(
                "geom tolerances must be finite and >= 0",
            ));
        }
        Ok(())
    }

    pub(crate) fn fit(&self) -> FitCfg {
        FitCfg {
            margin: self.margin,
            classify: self.classify,
            geom: self.geom,
        }
    }

    pub(crate) fn search(&self) -> SearchCfg {
        SearchCfg {
            angle_step_deg: self.angle_step_deg,
            resolution: self.resolution,
            edge_aligned_angles: true,
        }
    }
}

/// Winning working region for one boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InscribedResult {
    /// Vertices of the region, counter-clockwise.
    pub polygon: Vec<Vec2>,
    /// Tag of the boundary the region was fitted to.
    pub shape_type: ShapeTag,
    pub area: f64,
    /// `area / boundary area`, in `(0, 1]`.
    pub coverage: f64,
    pub strategy: StrategyKind,
}

impl fmt::Display for InscribedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InscribedResult(shape={}, area={:.2}, coverage={:.1}%, strategy={})",
            self.shape_type,
            self.area,
            self.coverage * 100.0,
            self.strategy
        )
    }
}
