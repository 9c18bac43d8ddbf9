//! Random field boundaries (radial jitter + replay tokens).
//!
//! Purpose
//! - Reproducible boundary inputs for property tests and benchmarks.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter. Sorted angles with jitter below half the spacing give a
//!   star-shaped, hence simple, ring. Optionally take the convex hull.
//! - Determinism: a replay token `(seed, index)` is the key of one `StdRng`,
//!   so any single draw can be replayed without the ones before it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{InscribeError, Result};
use crate::geom::{convex_hull, Polygon, Vec2};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    /// Inclusive `(lo, hi)` bounds, never below a triangle.
    fn bounds(self) -> (usize, usize) {
        match self {
            VertexCount::Fixed(n) => (n.max(3), n.max(3)),
            VertexCount::Uniform { min, max } => (min.max(3), max.max(min.max(3))),
        }
    }
}

/// Radial-jitter field configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`, clamped to [0, 0.9].
    pub radial_jitter: f64,
    /// Nominal field radius (linear unit of the boundary).
    pub radius: f64,
    pub center: Vec2,
    pub random_phase: bool,
    /// Replace the ring by its convex hull.
    pub convex: bool,
}

impl Default for FieldCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 5, max: 12 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.3,
            radius: 100.0,
            center: Vec2::zeros(),
            random_phase: true,
            convex: false,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Key the generator directly with `(seed, index)`; neighbouring indices
    /// get unrelated ChaCha streams.
    fn rng(self) -> StdRng {
        let mut key = [0u8; 32];
        key[..8].copy_from_slice(&self.seed.to_le_bytes());
        key[8..16].copy_from_slice(&self.index.to_le_bytes());
        key[16..24].copy_from_slice(b"fieldfit");
        StdRng::from_seed(key)
    }
}

/// Draw a field boundary.
///
/// Errors with `InvalidInput` only if the drawn ring fails validation
/// (possible for extreme jitter with very few vertices).
pub fn draw_field(cfg: FieldCfg, tok: ReplayToken) -> Result<Polygon> {
    if !(cfg.radius.is_finite() && cfg.radius > 0.0) {
        return Err(InscribeError::config(format!(
            "field radius must be > 0, got {}",
            cfg.radius
        )));
    }
    let mut rng = tok.rng();
    let (lo, hi) = cfg.vertex_count.bounds();
    let n = if lo == hi { lo } else { rng.gen_range(lo..=hi) };
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let delta = std::f64::consts::TAU / n as f64;
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let pts: Vec<Vec2> = (0..n)
        .map(|k| {
            let th = phase + (k as f64 + aj * rng.gen_range(-1.0..=1.0)) * delta;
            let r = cfg.radius * (1.0 + rj * rng.gen_range(-1.0..=1.0));
            cfg.center + Vec2::new(th.cos(), th.sin()) * r
        })
        .collect();
    let ring = if cfg.convex {
        convex_hull(&pts).ok_or_else(|| InscribeError::invalid("convex hull collapsed"))?
    } else {
        pts
    };
    Polygon::new(ring)
}
