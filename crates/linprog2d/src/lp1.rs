//! 1-D bounded LP on a line.
//!
//! The 2-D engine restricts the problem to a constraint's boundary line; every
//! other constraint then becomes a `Bound1` on the line parameter `t`. This
//! module intersects those bounds into an interval and picks the minimizer of
//! `coef · t` over it.
//!
//! Code cross-refs: `geom2::{Bound1, project}`, `lp2::engine`

use crate::geom2::{Bound1, Tolerance};

/// Closed interval `[lo, hi]` of the line parameter; ends may be infinite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval1 {
    pub lo: f64,
    pub hi: f64,
}

impl Default for Interval1 {
    fn default() -> Self {
        Self::full()
    }
}

impl Interval1 {
    #[inline]
    pub fn full() -> Self {
        Self {
            lo: f64::NEG_INFINITY,
            hi: f64::INFINITY,
        }
    }

    #[inline]
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Tighten by one bound. Returns `false` when the bound can never hold.
    #[inline]
    pub fn apply(&mut self, b: Bound1) -> bool {
        match b {
            Bound1::Lower(t) => self.lo = self.lo.max(t),
            Bound1::Upper(t) => self.hi = self.hi.min(t),
            Bound1::Always => {}
            Bound1::Never => return false,
        }
        true
    }

    /// `lo > hi` beyond tolerance.
    #[inline]
    pub fn is_empty(&self, tol: &Tolerance) -> bool {
        self.lo > self.hi && !tol.feq(self.lo, self.hi)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }

    /// Both ends coincide within tolerance.
    #[inline]
    pub fn is_degenerate(&self, tol: &Tolerance) -> bool {
        self.is_finite() && tol.feq(self.lo, self.hi)
    }

    /// Minimize `coef · t` over this interval.
    pub fn minimize(&self, coef: f64, tol: &Tolerance) -> Lp1Outcome {
        if self.is_empty(tol) {
            return Lp1Outcome::Infeasible;
        }
        if self.is_degenerate(tol) {
            return Lp1Outcome::Point(0.5 * (self.lo + self.hi));
        }
        if tol.is_zero(coef) {
            if self.is_finite() {
                Lp1Outcome::Interval(self.lo, self.hi)
            } else {
                Lp1Outcome::Unbounded
            }
        } else if coef > 0.0 {
            if self.lo.is_finite() {
                Lp1Outcome::Point(self.lo)
            } else {
                Lp1Outcome::Unbounded
            }
        } else if self.hi.is_finite() {
            Lp1Outcome::Point(self.hi)
        } else {
            Lp1Outcome::Unbounded
        }
    }
}

/// Result of a 1-D sub-problem, in line parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lp1Outcome {
    /// No feasible parameter.
    Infeasible,
    /// The objective decreases without bound along the line (or the optimal
    /// interval is infinite). Distinct from 2-D unboundedness.
    Unbounded,
    /// Unique minimizer.
    Point(f64),
    /// Zero objective slope: the whole finite interval is optimal.
    Interval(f64, f64),
}

/// Intersect `bounds` and minimize `coef · t`; stops at the first `Never`.
pub fn solve_1d<I>(bounds: I, coef: f64, tol: &Tolerance) -> Lp1Outcome
where
    I: IntoIterator<Item = Bound1>,
{
    let mut iv = Interval1::full();
    for b in bounds {
        if !iv.apply(b) {
            return Lp1Outcome::Infeasible;
        }
    }
    iv.minimize(coef, tol)
}
