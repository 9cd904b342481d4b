//! Problem type, solver configuration, and the solve entry points.
//!
//! - `Problem`: immutable objective plus constraint list.
//! - `SolveCfg`: shared tolerance and processing order.
//! - `Solver`: owns working buffers so repeated solves do not reallocate.
//! - `solve_arrays`: raw-array boundary used by the C ABI and Python binding.

use std::fmt;

use nalgebra::Vector2;

use crate::geom2::{HalfPlane, Tolerance};
use crate::lp2::{self, Order, Workspace};
use crate::result::{Outcome, RawResult};

/// Reasons a problem cannot be solved. All map to `Status::Error`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// The objective gradient is zero (every feasible point would be optimal).
    ZeroGradient,
    /// NaN or infinity in the objective (`None`) or in a constraint.
    NonFinite { constraint: Option<usize> },
    /// Constraint arrays of different lengths.
    ShapeMismatch { gx: usize, gy: usize, h: usize },
    /// Working buffers could not be allocated.
    Alloc { requested: usize },
    /// An explicit order that is not a permutation of the constraints.
    InvalidOrder,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::ZeroGradient => write!(f, "objective gradient is zero"),
            SolveError::NonFinite { constraint: None } => {
                write!(f, "objective gradient is not finite")
            }
            SolveError::NonFinite {
                constraint: Some(i),
            } => write!(f, "constraint {} has a non-finite coefficient", i),
            SolveError::ShapeMismatch { gx, gy, h } => write!(
                f,
                "constraint arrays differ in length (gx={}, gy={}, h={})",
                gx, gy, h
            ),
            SolveError::Alloc { requested } => {
                write!(f, "could not allocate buffers for {} constraints", requested)
            }
            SolveError::InvalidOrder => {
                write!(f, "processing order is not a permutation of the constraints")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Solver configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveCfg {
    pub tol: Tolerance,
    pub order: Order,
}

impl SolveCfg {
    pub fn with_order(order: Order) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }
}

/// Minimize `c·p` subject to every constraint `n_i·p >= h_i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    c: Vector2<f64>,
    constraints: Vec<HalfPlane>,
}

impl Problem {
    pub fn new(c: Vector2<f64>, constraints: Vec<HalfPlane>) -> Self {
        Self { c, constraints }
    }

    /// Build from the column layout `gx[i]·x + gy[i]·y >= h[i]`.
    pub fn from_arrays(
        cx: f64,
        cy: f64,
        gx: &[f64],
        gy: &[f64],
        h: &[f64],
    ) -> Result<Self, SolveError> {
        if gx.len() != gy.len() || gx.len() != h.len() {
            return Err(SolveError::ShapeMismatch {
                gx: gx.len(),
                gy: gy.len(),
                h: h.len(),
            });
        }
        let constraints = gx
            .iter()
            .zip(gy)
            .zip(h)
            .map(|((&gx, &gy), &h)| HalfPlane::from_coeffs(gx, gy, h))
            .collect();
        Ok(Self::new(Vector2::new(cx, cy), constraints))
    }

    #[inline]
    pub fn objective(&self) -> Vector2<f64> {
        self.c
    }

    #[inline]
    pub fn constraints(&self) -> &[HalfPlane] {
        &self.constraints
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Objective value at `p`.
    #[inline]
    pub fn value(&self, p: Vector2<f64>) -> f64 {
        self.c.dot(&p)
    }

    /// Whether `p` satisfies every constraint under `tol`.
    pub fn is_feasible(&self, p: Vector2<f64>, tol: &Tolerance) -> bool {
        self.constraints.iter().all(|hp| hp.contains(p, tol))
    }
}

/// Reusable solver. Buffers grow on demand and are kept between calls.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    cfg: SolveCfg,
    ws: Workspace,
}

impl Solver {
    pub fn new(cfg: SolveCfg) -> Self {
        Self {
            cfg,
            ws: Workspace::default(),
        }
    }

    /// Solver with buffers for at least `n` constraints.
    pub fn with_capacity(n: usize, cfg: SolveCfg) -> Result<Self, SolveError> {
        let mut solver = Self::new(cfg);
        solver.ws.try_reserve(n)?;
        Ok(solver)
    }

    /// Number of constraints the solver can take without reallocating.
    pub fn capacity(&self) -> usize {
        self.ws.capacity()
    }

    pub fn cfg(&self) -> &SolveCfg {
        &self.cfg
    }

    pub fn solve(&mut self, problem: &Problem) -> Result<Outcome, SolveError> {
        let res = lp2::run(problem, &self.cfg, None, &mut self.ws);
        log_outcome(problem, &res);
        res
    }

    /// Solve processing constraints in the order `perm` (a permutation of
    /// `0..problem.len()`), ignoring `cfg.order`.
    pub fn solve_with_order(
        &mut self,
        problem: &Problem,
        perm: &[usize],
    ) -> Result<Outcome, SolveError> {
        let res = lp2::run(problem, &self.cfg, Some(perm), &mut self.ws);
        log_outcome(problem, &res);
        res
    }
}

fn log_outcome(problem: &Problem, res: &Result<Outcome, SolveError>) {
    match res {
        Ok(out) => tracing::debug!(n = problem.len(), status = %out.status(), "solve"),
        Err(e) => tracing::debug!(n = problem.len(), error = %e, "solve failed"),
    }
}

/// One-shot solve with the default configuration.
pub fn solve(problem: &Problem) -> Result<Outcome, SolveError> {
    solve_with_cfg(problem, &SolveCfg::default())
}

pub fn solve_with_cfg(problem: &Problem, cfg: &SolveCfg) -> Result<Outcome, SolveError> {
    Solver::new(*cfg).solve(problem)
}

/// Solve from raw arrays and fold the result into the fixed-layout record.
pub fn solve_arrays(cx: f64, cy: f64, gx: &[f64], gy: &[f64], h: &[f64]) -> RawResult {
    Problem::from_arrays(cx, cy, gx, gy, h)
        .and_then(|p| solve(&p))
        .into()
}
