//! 2D incremental LP engine (Seidel-style randomized incremental algorithm).
//!
//! Purpose
//! - Minimize `c·p` subject to `n_i·p >= h_i` in expected O(n) time.
//!
//! Pipeline
//! - `condition`: unit normals, degenerate zero-normal constraints, centring.
//! - `recession`: decide unboundedness up front from the recession cone; for
//!   bounded problems, pick 2–3 certificate constraints to fold first.
//! - `order`: processing order (seeded shuffle by default).
//! - `engine`: the fold; restricted problems go to `lp1`.
//!
//! Invariants
//! - After the certificate is folded every sub-problem has a bounded optimal
//!   set, so the running optimum is always a point or a finite edge.
//! - An infeasible 1-D sub-problem ends the run: adding constraints never
//!   restores feasibility.
//!
//! Code cross-refs: `geom2::project`, `lp1::solve_1d`, `solver::Solver`

mod condition;
mod engine;
mod order;
mod recession;

pub use order::{Order, DEFAULT_SEED};

use crate::geom2::HalfPlane;
use crate::result::Outcome;
use crate::solver::{Problem, SolveCfg, SolveError};
use condition::{condition, Conditioned};
use engine::Engine;
use recession::{analyze, is_feasible_along, Recession};

/// Working buffers reused across solves.
#[derive(Clone, Debug, Default)]
pub(crate) struct Workspace {
    pub(crate) hps: Vec<HalfPlane>,
    /// Original index of each conditioned constraint.
    pub(crate) src: Vec<usize>,
    pub(crate) seq: Vec<usize>,
}

impl Workspace {
    /// Clear the buffers and make room for `n` constraints.
    pub(crate) fn try_reserve(&mut self, n: usize) -> Result<(), SolveError> {
        self.hps.clear();
        self.src.clear();
        self.seq.clear();
        let alloc = |_| SolveError::Alloc { requested: n };
        self.hps.try_reserve(n).map_err(alloc)?;
        self.src.try_reserve(n).map_err(alloc)?;
        self.seq.try_reserve(n).map_err(alloc)?;
        Ok(())
    }

    pub(crate) fn capacity(&self) -> usize {
        self.hps
            .capacity()
            .min(self.src.capacity())
            .min(self.seq.capacity())
    }
}

/// Solve `problem` using `ws` for scratch space. `perm`, when given, must be a
/// permutation of `0..problem.len()` and replaces `cfg.order`.
pub(crate) fn run(
    problem: &Problem,
    cfg: &SolveCfg,
    perm: Option<&[usize]>,
    ws: &mut Workspace,
) -> Result<Outcome, SolveError> {
    ws.try_reserve(problem.len())?;
    let tol = &cfg.tol;
    let conditioned = condition(problem, tol, &mut ws.hps, &mut ws.src)?;
    if let Some(perm) = perm {
        order::fill_custom(perm, problem.len(), &ws.src, &mut ws.seq)?;
    }
    let (c, offset) = match conditioned {
        Conditioned::Infeasible { constraint } => {
            tracing::trace!(constraint, "zero normal with positive offset");
            return Ok(Outcome::Infeasible);
        }
        Conditioned::Ready { c, offset } => (c, offset),
    };

    let cert = match analyze(&ws.hps, c, tol) {
        Recession::Direction(d) => {
            let out = if is_feasible_along(&ws.hps, d, tol) {
                Outcome::Unbounded
            } else {
                Outcome::Infeasible
            };
            tracing::trace!(?d, ?out, "recession direction");
            return Ok(out);
        }
        Recession::Bounded(cert) => cert,
    };

    if perm.is_none() {
        order::fill(cfg.order, &ws.hps, &mut ws.seq);
    }
    let out = Engine::new(&ws.hps, c, tol).run(&mut ws.seq, cert);
    Ok(out.translated(offset))
}
