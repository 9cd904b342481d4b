//! Constraint processing orders.
//!
//! Random order gives the expected O(n) bound; every other order is still
//! correct, only slower in the worst case. Angle-sorted order is the classic
//! adversarial input and is kept for tests and benchmarks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::geom2::{angle_of, HalfPlane};
use crate::solver::SolveError;

/// Seed used by `Order::default()`.
pub const DEFAULT_SEED: u64 = 0x5eed_2d1b_0000_0001;

/// How the engine orders constraints before folding them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Uniform shuffle from a seeded `StdRng` (reproducible per seed).
    Random { seed: u64 },
    /// Input order.
    Given,
    /// Sorted by the angle of the constraint normal.
    ByAngle,
}

impl Default for Order {
    fn default() -> Self {
        Order::Random { seed: DEFAULT_SEED }
    }
}

/// Write a permutation of `0..hps.len()` into `out`.
pub(crate) fn fill(order: Order, hps: &[HalfPlane], out: &mut Vec<usize>) {
    out.clear();
    out.extend(0..hps.len());
    match order {
        Order::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            out.shuffle(&mut rng);
        }
        Order::Given => {}
        Order::ByAngle => {
            out.sort_by(|&a, &b| {
                angle_of(hps[a].n)
                    .partial_cmp(&angle_of(hps[b].n))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
}

/// Translate a caller permutation of the original constraints into an order
/// over the conditioned ones (`src[k]` is the original index of entry `k`).
pub(crate) fn fill_custom(
    perm: &[usize],
    total: usize,
    src: &[usize],
    out: &mut Vec<usize>,
) -> Result<(), SolveError> {
    if perm.len() != total {
        return Err(SolveError::InvalidOrder);
    }
    let mut rank = Vec::new();
    rank.try_reserve_exact(total)
        .map_err(|_| SolveError::Alloc { requested: total })?;
    rank.resize(total, usize::MAX);
    for (pos, &i) in perm.iter().enumerate() {
        if i >= total || rank[i] != usize::MAX {
            return Err(SolveError::InvalidOrder);
        }
        rank[i] = pos;
    }
    out.clear();
    out.extend(0..src.len());
    out.sort_by_key(|&k| rank[src[k]]);
    Ok(())
}
