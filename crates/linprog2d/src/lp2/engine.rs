//! Seidel fold over a conditioned, bounded problem.
//!
//! The running optimum is a point or an edge of optimal points on one line.
//! Folding constraint `m` either keeps it, clips the edge, or re-solves the
//! problem restricted to `m`'s boundary line against every constraint applied
//! so far.

use std::ops::ControlFlow;

use nalgebra::Vector2;

use super::recession::Certificate;
use crate::geom2::{project, HalfPlane, Line, Tolerance};
use crate::lp1::{solve_1d, Interval1, Lp1Outcome};
use crate::result::Outcome;

/// Running optimum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Optimum {
    Point(Vector2<f64>),
    /// Every point of `line` with parameter in `[lo, hi]` is optimal. The
    /// ends may be infinite only while the certificate is being folded.
    Edge { line: Line, lo: f64, hi: f64 },
}

impl Optimum {
    fn from_interval(line: Line, iv: Interval1, tol: &Tolerance) -> Optimum {
        if iv.is_degenerate(tol) {
            Optimum::Point(line.at(0.5 * (iv.lo + iv.hi)))
        } else {
            Optimum::Edge {
                line,
                lo: iv.lo,
                hi: iv.hi,
            }
        }
    }

    fn into_outcome(self, tol: &Tolerance) -> Outcome {
        match self {
            Optimum::Point(p) => Outcome::Point(p),
            Optimum::Edge { line, lo, hi } => {
                let iv = Interval1::new(lo, hi);
                if !iv.is_finite() {
                    Outcome::Unbounded
                } else if iv.is_degenerate(tol) {
                    Outcome::Point(line.at(0.5 * (lo + hi)))
                } else {
                    Outcome::Edge(line.at(lo), line.at(hi))
                }
            }
        }
    }
}

pub(crate) struct Engine<'a> {
    hps: &'a [HalfPlane],
    c: Vector2<f64>,
    tol: &'a Tolerance,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(hps: &'a [HalfPlane], c: Vector2<f64>, tol: &'a Tolerance) -> Self {
        Self { hps, c, tol }
    }

    /// Fold every constraint in `seq` (a permutation of `0..hps.len()`). The
    /// certificate constraints are moved to the front of `seq` first.
    pub(crate) fn run(&self, seq: &mut [usize], cert: Certificate) -> Outcome {
        let (start, seed) = match cert {
            Certificate::Apex { lower, upper } => {
                hoist(seq, 0, upper);
                hoist(seq, 1, lower);
                match self.resolve(lower, &seq[..1]) {
                    ControlFlow::Continue(co) => (2, co),
                    ControlFlow::Break(out) => return out,
                }
            }
            Certificate::Level {
                level,
                lower,
                upper,
            } => {
                hoist(seq, 0, level);
                hoist(seq, 1, lower);
                hoist(seq, 2, upper);
                let co = Optimum::Edge {
                    line: self.hps[level].boundary(),
                    lo: f64::NEG_INFINITY,
                    hi: f64::INFINITY,
                };
                (1, co)
            }
        };

        let mut co = seed;
        for k in start..seq.len() {
            match self.step(co, seq[k], &seq[..k]) {
                ControlFlow::Continue(next) => co = next,
                ControlFlow::Break(out) => {
                    tracing::trace!(step = k, constraint = seq[k], ?out, "early exit");
                    return out;
                }
            }
        }
        co.into_outcome(self.tol)
    }

    /// Fold constraint `m` into `co`; `applied` are the constraints already in.
    fn step(&self, co: Optimum, m: usize, applied: &[usize]) -> ControlFlow<Outcome, Optimum> {
        let hp = &self.hps[m];
        match co {
            Optimum::Point(p) => {
                if hp.contains(p, self.tol) {
                    return ControlFlow::Continue(co);
                }
            }
            Optimum::Edge { line, lo, hi } => {
                let mut iv = Interval1::new(lo, hi);
                if iv.apply(project(hp, &line, self.tol)) && !iv.is_empty(self.tol) {
                    return ControlFlow::Continue(Optimum::from_interval(line, iv, self.tol));
                }
            }
        }
        self.resolve(m, applied)
    }

    /// Optimum restricted to the boundary of `m`.
    fn resolve(&self, m: usize, applied: &[usize]) -> ControlFlow<Outcome, Optimum> {
        let line = self.hps[m].boundary();
        let coef = self.c.dot(&line.dir);
        let bounds = applied
            .iter()
            .map(|&j| project(&self.hps[j], &line, self.tol));
        match solve_1d(bounds, coef, self.tol) {
            Lp1Outcome::Infeasible => ControlFlow::Break(Outcome::Infeasible),
            Lp1Outcome::Unbounded => ControlFlow::Break(Outcome::Unbounded),
            Lp1Outcome::Point(t) => ControlFlow::Continue(Optimum::Point(line.at(t))),
            Lp1Outcome::Interval(lo, hi) => ControlFlow::Continue(Optimum::Edge { line, lo, hi }),
        }
    }
}

/// Swap `item` into `seq[pos]`, searching only `seq[pos..]`.
fn hoist(seq: &mut [usize], pos: usize, item: usize) {
    if let Some(off) = seq[pos..].iter().position(|&x| x == item) {
        seq.swap(pos, pos + off);
    }
}
