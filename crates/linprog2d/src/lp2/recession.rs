//! Recession-cone analysis: unbounded problems and seed certificates.
//!
//! Frame
//! - `u = -c` is the descent direction and `v = perp(u)`. A constraint with
//!   unit normal `n` has coordinates `p = n·v`, `q = n·u`.
//! - A non-zero direction `d` with `c·d <= 0` is a recession direction iff
//!   `n_i·d >= 0` for all `i`. Either `d = a·v + u` for some `a ∈ ℝ` (strict
//!   descent: the 1-D problem `p_i·a + q_i >= 0`) or `d = ±v` (level).
//!
//! Outcomes
//! - A recession direction exists: the problem is UNBOUNDED when feasible. A
//!   point far along `d` satisfies every constraint with `n·d > 0`, so
//!   feasibility reduces to the constraints parallel to `d`.
//! - None exists: the objective is bounded below with a bounded optimal set.
//!   The blocking constraints found on the way form a certificate of two or
//!   three constraints; folding them first keeps every sub-problem bounded.

use nalgebra::Vector2;

use crate::geom2::{bound_from, perp, unit, Bound1, HalfPlane, Tolerance};
use crate::lp1::Interval1;

/// Constraints that bound the problem on their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Certificate {
    /// Two non-level ceilings meeting at the top: `lower` blocks `-v`,
    /// `upper` blocks `+v`; their intersection is the optimum of the pair.
    Apex { lower: usize, upper: usize },
    /// A level constraint (normal along `c`) blocking every descent direction,
    /// with one blocker on each side along it.
    Level {
        level: usize,
        lower: usize,
        upper: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Recession {
    /// Recession direction with `c·d <= 0` (unit length).
    Direction(Vector2<f64>),
    Bounded(Certificate),
}

/// Bound tracker remembering which constraint set each end.
#[derive(Clone, Copy, Debug)]
struct Tracked {
    iv: Interval1,
    lower: Option<usize>,
    upper: Option<usize>,
    level: Option<usize>,
}

pub(crate) fn analyze(hps: &[HalfPlane], c: Vector2<f64>, tol: &Tolerance) -> Recession {
    let u = -c;
    let v = perp(u);
    let mut t = Tracked {
        iv: Interval1::full(),
        lower: None,
        upper: None,
        level: None,
    };
    for (i, hp) in hps.iter().enumerate() {
        let p = hp.n.dot(&v);
        let q = hp.n.dot(&u);
        match bound_from(p, q, 0.0, tol) {
            Bound1::Lower(a) => {
                if t.lower.is_none() || a > t.iv.lo {
                    t.iv.lo = a;
                    t.lower = Some(i);
                }
            }
            Bound1::Upper(a) => {
                if t.upper.is_none() || a < t.iv.hi {
                    t.iv.hi = a;
                    t.upper = Some(i);
                }
            }
            Bound1::Always => {}
            Bound1::Never => {
                if t.level.is_none() {
                    t.level = Some(i);
                }
            }
        }
    }

    if t.level.is_none() && !t.iv.is_empty(tol) {
        let a = pick_inside(&t.iv);
        if let Some(d) = unit(v * a + u) {
            return Recession::Direction(d);
        }
    }
    // `+v` is free iff nothing produced an upper bound (p < 0), `-v` likewise.
    match (t.lower, t.upper) {
        (_, None) => Recession::Direction(v),
        (None, Some(_)) => Recession::Direction(-v),
        (Some(lower), Some(upper)) => match t.level {
            Some(level) => Recession::Bounded(Certificate::Level {
                level,
                lower,
                upper,
            }),
            None => Recession::Bounded(Certificate::Apex { lower, upper }),
        },
    }
}

/// Some parameter inside a non-empty interval, away from finite ends.
fn pick_inside(iv: &Interval1) -> f64 {
    match (iv.lo.is_finite(), iv.hi.is_finite()) {
        (true, true) => 0.5 * (iv.lo + iv.hi),
        (true, false) => iv.lo + 1.0,
        (false, true) => iv.hi - 1.0,
        (false, false) => 0.0,
    }
}

/// Whether the region is non-empty, given a recession direction `d`.
///
/// Only constraints parallel to `d` can fail far along `d`; they bound the
/// offset across `d` and are solved as a 1-D feasibility problem.
pub(crate) fn is_feasible_along(hps: &[HalfPlane], d: Vector2<f64>, tol: &Tolerance) -> bool {
    let across = perp(d);
    let mut iv = Interval1::full();
    for hp in hps {
        if hp.n.dot(&d) > tol.abs {
            continue;
        }
        if !iv.apply(bound_from(hp.n.dot(&across), 0.0, hp.h, tol)) {
            return false;
        }
    }
    !iv.is_empty(tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn unit_hps(raw: &[(f64, f64, f64)]) -> Vec<HalfPlane> {
        raw.iter()
            .map(|&(gx, gy, h)| HalfPlane::from_coeffs(gx, gy, h).normalized().unwrap())
            .collect()
    }

    #[test]
    fn no_constraints_has_descent_direction() {
        let tol = Tolerance::default();
        let c = vector![0.6, 0.8];
        match analyze(&[], c, &tol) {
            Recession::Direction(d) => assert!(c.dot(&d) < 0.0),
            other => panic!("unexpected {other:?}"),
        }
        assert!(is_feasible_along(&[], -c, &tol));
    }

    #[test]
    fn vee_is_bounded_by_apex() {
        let tol = Tolerance::default();
        // y >= x, y >= -x, minimize y.
        let hps = unit_hps(&[(-1.0, 1.0, 0.0), (1.0, 1.0, 0.0)]);
        match analyze(&hps, vector![0.0, 1.0], &tol) {
            Recession::Bounded(Certificate::Apex { lower, upper }) => {
                assert_ne!(lower, upper);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn level_floor_alone_is_unbounded_sideways() {
        let tol = Tolerance::default();
        // y >= 1, minimize y: the optimal set is the whole line y = 1.
        let hps = unit_hps(&[(0.0, 1.0, 1.0)]);
        match analyze(&hps, vector![0.0, 1.0], &tol) {
            Recession::Direction(d) => {
                assert!(d.y.abs() < 1e-12);
                assert!(is_feasible_along(&hps, d, &tol));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn boxed_level_floor_gives_level_certificate() {
        let tol = Tolerance::default();
        let hps = unit_hps(&[
            (0.0, 1.0, 1.0),
            (1.0, 0.0, -2.0),
            (-1.0, 0.0, -3.0),
        ]);
        assert_eq!(
            analyze(&hps, vector![0.0, 1.0], &tol),
            Recession::Bounded(Certificate::Level {
                level: 0,
                lower: 1,
                upper: 2
            })
        );
    }

    #[test]
    fn parallel_strip_feasibility() {
        let tol = Tolerance::default();
        let ok = unit_hps(&[(0.0, 1.0, 1.0), (0.0, -1.0, -3.0)]);
        let bad = unit_hps(&[(0.0, 1.0, 1.0), (0.0, -1.0, 3.0)]);
        let d = vector![1.0, 0.0];
        assert!(is_feasible_along(&ok, d, &tol));
        assert!(!is_feasible_along(&bad, d, &tol));
    }
}
