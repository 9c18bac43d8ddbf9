//! Triangle fitter: centroid scaling plus a local pose search.
//!
//! Scaling toward the centroid by `1 - 2·margin` leaves an uneven clearance
//! (proportional to each side's height). The smallest of those clearances,
//! `d0`, is kept as the requirement; a coordinate search over a translation
//! and a small rotation of the scaled triangle then grows the scale factor as
//! far as the requirement allows.

use nalgebra::Rotation2;
use tracing::trace;

use super::{finish, outline_if, FitCfg, Fitter, StrategyKind};
use crate::classify::ShapeTag;
use crate::geom::{scale_about, signed_distance, Polygon, Vec2};
use crate::search::Candidate;

/// Scale toward the centroid, then recover area by perturbing the pose.
#[derive(Clone, Copy, Debug)]
pub struct TriangleScaled {
    pub cfg: FitCfg,
    /// Run the pose search after the initial scaling.
    pub refine: bool,
    /// Upper bound on accepted or rejected pose moves.
    pub max_moves: usize,
}

impl TriangleScaled {
    pub fn new(cfg: FitCfg) -> Self {
        Self {
            cfg,
            refine: true,
            max_moves: 400,
        }
    }
}

impl Fitter for TriangleScaled {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TriangleScaled
    }

    fn attempt(&self, boundary: &Polygon) -> Option<Candidate> {
        let outline = outline_if(boundary, &self.cfg, ShapeTag::Triangle)?;
        let tri = outline.points();
        let c = outline.centroid();
        let s0 = 1.0 - 2.0 * self.cfg.margin;
        if s0 <= 0.0 {
            return None;
        }
        let scaled = scale_about(tri, s0, c);
        if !self.refine || self.cfg.margin <= 0.0 {
            return finish(boundary, scaled, &self.cfg.geom);
        }
        let d0 = scaled
            .iter()
            .map(|&v| signed_distance(tri, v))
            .fold(f64::INFINITY, f64::min);
        let pose = PoseSearch {
            tri,
            centre: c,
            clearance: d0,
        };
        let (best, s) = pose.run(s0, outline.diameter(), self.max_moves);
        trace!(s0, s, dx = best.t.x, dy = best.t.y, rot = best.rot, "triangle_pose");
        finish(boundary, pose.place(best, s), &self.cfg.geom)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Pose {
    t: Vec2,
    rot: f64,
}

struct PoseSearch<'a> {
    tri: &'a [Vec2],
    centre: Vec2,
    clearance: f64,
}

impl PoseSearch<'_> {
    /// `centre + t + R(rot)·s·(p - centre)` for every vertex.
    fn place(&self, pose: Pose, s: f64) -> Vec<Vec2> {
        let r = Rotation2::new(pose.rot);
        self.tri
            .iter()
            .map(|p| self.centre + pose.t + r * ((p - self.centre) * s))
            .collect()
    }

    fn feasible(&self, pose: Pose, s: f64) -> bool {
        // The boundary is convex, so the clearance of the placed triangle is
        // attained at a vertex.
        self.place(pose, s)
            .into_iter()
            .all(|v| signed_distance(self.tri, v) >= self.clearance)
    }

    /// Largest feasible scale for `pose`, or 0 if none.
    fn max_scale(&self, pose: Pose) -> f64 {
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        if !self.feasible(pose, 1e-6) {
            return 0.0;
        }
        for _ in 0..48 {
            let mid = 0.5 * (lo + hi);
            if self.feasible(pose, mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }

    fn run(&self, s0: f64, diameter: f64, max_moves: usize) -> (Pose, f64) {
        let mut best = Pose::default();
        let mut best_s = s0;
        let mut step_t = 0.05 * diameter;
        let mut step_r = 2.0_f64.to_radians();
        let mut moves = 0usize;
        while moves < max_moves && (step_t > 1e-7 * diameter || step_r > 1e-7) {
            let mut improved = false;
            let candidates = [
                Vec2::new(step_t, 0.0),
                Vec2::new(-step_t, 0.0),
                Vec2::new(0.0, step_t),
                Vec2::new(0.0, -step_t),
            ];
            let trials = candidates
                .iter()
                .map(|&dt| Pose {
                    t: best.t + dt,
                    rot: best.rot,
                })
                .chain([step_r, -step_r].into_iter().map(|dr| Pose {
                    t: best.t,
                    rot: best.rot + dr,
                }));
            for trial in trials {
                moves += 1;
                let s = self.max_scale(trial);
                if s > best_s * (1.0 + 1e-12) {
                    best = trial;
                    best_s = s;
                    improved = true;
                    break;
                }
            }
            if !improved {
                step_t *= 0.5;
                step_r *= 0.5;
            }
        }
        (best, best_s)
    }
}
