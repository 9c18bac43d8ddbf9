//! Largest inscribed working regions and coverage passes for field boundaries.
//!
//! Pipeline: validate the boundary (`Polygon`), classify its shape family,
//! run the shape fitter and/or the rotated-rectangle raster search, keep the
//! largest contained region (`smart_inscribe`), then sweep it with parallel
//! passes (`generate_paths`).
//!
//! Units are whatever planar linear unit the caller projects into; angles are
//! degrees in configuration and radians everywhere else.
//!
//! Every entry point is a pure function of its inputs and an explicit
//! configuration value, so independent boundaries can be processed on any
//! number of threads.

pub mod classify;
pub mod error;
pub mod fields;
pub mod fit;
pub mod geom;
pub mod inscribe;
pub mod paths;
pub mod raster;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use classify::{classify, ClassifyCfg, ShapeTag};
pub use error::{InscribeError, Result};
pub use geom::{GeomCfg, Polygon, Vec2};
pub use inscribe::{smart_inscribe, smart_inscribe_points, InscribeCfg, InscribedResult};
pub use paths::{generate_paths, plan_length, WorkPath};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::classify::{classify, classify_outline, ClassifyCfg, ShapeTag};
    pub use crate::error::{InscribeError, Result};
    pub use crate::fields::{draw_field, FieldCfg, ReplayToken, VertexCount};
    pub use crate::fit::{shape_fitter, FitCfg, Fitter, StrategyKind};
    pub use crate::geom::{GeomCfg, Polygon, Vec2};
    pub use crate::inscribe::{smart_inscribe, smart_inscribe_points, InscribeCfg, InscribedResult};
    pub use crate::paths::{generate_paths, plan_length, WorkPath};
    pub use crate::raster::{largest_rectangle, rasterize, GridRect, OccupancyGrid};
    pub use crate::search::{search, Candidate, SearchCfg};
}
