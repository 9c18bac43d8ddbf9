//! Error taxonomy for boundary validation and inscribed-region search.
//!
//! Fitters never produce these: a fitter that cannot handle a boundary
//! returns `None` and the orchestrator falls back. Only total failure, bad
//! input, or an internal containment defect reach the caller.

use thiserror::Error;

/// Errors surfaced by `smart_inscribe`, `Polygon::new` and `generate_paths`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InscribeError {
    /// Fewer than three distinct vertices, non-finite coordinates,
    /// self-intersection or (near) zero area.
    #[error("invalid boundary: {reason}")]
    InvalidInput { reason: String },

    /// A configuration value is out of range (non-positive step, width, ...).
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Every strategy ran and none produced a contained region.
    #[error(
        "no inscribed region found (angle_step={angle_step_deg}°, resolution={resolution}, strategies tried: {strategies})"
    )]
    NoCandidateFound {
        angle_step_deg: f64,
        resolution: usize,
        strategies: String,
    },

    /// A produced polygon leaves the boundary. Internal defect; never clipped.
    #[error("containment violation in strategy {strategy}: {detail}")]
    ContainmentViolation { strategy: String, detail: String },
}

impl InscribeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, InscribeError>;
