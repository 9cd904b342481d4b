//! Random feasible problems (benchmarks and property tests).
//!
//! Model
//! - Draw an objective `c ∈ [-1, 1]²` and a witness point `x ∈ [-r, r]²`.
//! - Draw each constraint `(g, h)` with entries in `[-s, s]`; if `x` violates
//!   it, flip it to `(-g, -h)`. The witness is therefore always feasible.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom2::HalfPlane;
use crate::solver::Problem;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct ProblemCfg {
    pub n: usize,
    /// Coefficient range `s` for `g` and `h`.
    pub coef_range: f64,
    /// Range `r` of the witness point.
    pub witness_range: f64,
}

impl Default for ProblemCfg {
    fn default() -> Self {
        Self {
            n: 100,
            coef_range: 100.0,
            witness_range: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// A random problem and a point known to be feasible for it.
#[derive(Clone, Debug)]
pub struct Draw {
    pub problem: Problem,
    pub witness: Vector2<f64>,
}

pub fn draw_feasible(cfg: ProblemCfg, tok: ReplayToken) -> Draw {
    let mut rng = tok.to_std_rng();
    let s = cfg.coef_range.abs().max(f64::MIN_POSITIVE);
    let r = cfg.witness_range.abs();
    let c = Vector2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
    let witness = Vector2::new(rng.gen_range(-r..=r), rng.gen_range(-r..=r));
    let constraints = (0..cfg.n)
        .map(|_| {
            let g = Vector2::new(rng.gen_range(-s..=s), rng.gen_range(-s..=s));
            let h = rng.gen_range(-s..=s);
            if g.dot(&witness) < h {
                HalfPlane::new(-g, -h)
            } else {
                HalfPlane::new(g, h)
            }
        })
        .collect();
    Draw {
        problem: Problem::new(c, constraints),
        witness,
    }
}
