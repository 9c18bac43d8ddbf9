//! Planar polygon kernel for field boundaries.
//!
//! Purpose
//! - Provide a validated, counter-clockwise `Polygon` plus the pure functions
//!   the classifier, rasterizer, fitters and path generator build on.
//! - Keep every operation allocation-light and free of shared state so that
//!   independent boundaries can be processed on any number of threads.
//!
//! Conventions
//! - Angles are radians; degrees only appear in public configuration.
//! - Tolerances are relative to the polygon diameter (`GeomCfg`).
//! - Boundary points count as inside.
//!
//! Code cross-refs: `Polygon`, `GeomCfg`, `kernel::*`, `contain::*`

pub mod contain;
pub mod kernel;
mod types;
mod util;

pub use contain::{containment_violation, contains_polygon, shrink_into, ContainCheck};
pub use kernel::{
    bounds, centroid, cross2, diameter, edge_lengths, edge_vectors, interior_angles, is_convex,
    line_crossings, perimeter, point_in_polygon, rotate, scale_about, segment_intersection,
    segments_cross, signed_area, signed_distance, translate,
};
pub use types::{GeomCfg, Polygon};
pub use util::{convex_hull, inset_convex, simplify_collinear};

/// Planar point / vector type used throughout the crate.
pub type Vec2 = nalgebra::Vector2<f64>;

#[cfg(test)]
mod tests;
