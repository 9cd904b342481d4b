//! Problem conditioning: unit normals, degenerate constraints, centring.
//!
//! - Every constraint is rescaled to a unit normal so that one absolute
//!   tolerance means the same thing for all of them.
//! - Zero normals are never lines: `0 >= h` either always holds (dropped) or
//!   never holds (infeasible).
//! - The problem is translated by the least-squares centre
//!   `o = argmin Σ (h_i - n_i·o)² = (GᵀG)⁻¹ Gᵀh`, computed in one pass since
//!   `GᵀG` is 2×2. Results are translated back by `o`.

use nalgebra::{Matrix2, Vector2};

use crate::geom2::{unit, HalfPlane, Tolerance};
use crate::solver::{Problem, SolveError};

/// Conditioned copy of a problem (constraints live in the caller's buffer).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Conditioned {
    /// A zero-normal constraint `0 >= h` with `h > 0`.
    Infeasible { constraint: usize },
    Ready {
        /// Unit objective gradient.
        c: Vector2<f64>,
        /// Translation applied to the problem; add back to results.
        offset: Vector2<f64>,
    },
}

/// Fill `hps` with the conditioned constraints and `src` with their indices in
/// `problem`. Both buffers are cleared first.
pub(crate) fn condition(
    problem: &Problem,
    tol: &Tolerance,
    hps: &mut Vec<HalfPlane>,
    src: &mut Vec<usize>,
) -> Result<Conditioned, SolveError> {
    hps.clear();
    src.clear();

    let c = problem.objective();
    if !(c.x.is_finite() && c.y.is_finite()) {
        return Err(SolveError::NonFinite { constraint: None });
    }
    let c = unit(c).ok_or(SolveError::ZeroGradient)?;

    let mut gtg = Matrix2::<f64>::zeros();
    let mut gth = Vector2::<f64>::zeros();
    // Non-finite input takes precedence over a contradictory zero normal.
    let mut contradiction = None;
    for (i, hp) in problem.constraints().iter().enumerate() {
        if !hp.is_finite() {
            return Err(SolveError::NonFinite {
                constraint: Some(i),
            });
        }
        // A normal negligible next to its offset behaves like a zero normal.
        let Some(hp) = hp.normalized().filter(|u| u.h.is_finite()) else {
            if hp.h > 0.0 && contradiction.is_none() {
                contradiction = Some(i);
            }
            continue;
        };
        gtg += hp.n * hp.n.transpose();
        gth += hp.n * hp.h;
        hps.push(hp);
        src.push(i);
    }
    if let Some(constraint) = contradiction {
        return Ok(Conditioned::Infeasible { constraint });
    }

    let offset = centre(&gtg, &gth, tol);
    if offset != Vector2::zeros() {
        for hp in hps.iter_mut() {
            hp.h -= hp.n.dot(&offset);
        }
    }
    Ok(Conditioned::Ready { c, offset })
}

/// Least-squares centre; zero when `GᵀG` is (numerically) singular, e.g. for a
/// single constraint or a family of parallel ones.
fn centre(gtg: &Matrix2<f64>, gth: &Vector2<f64>, tol: &Tolerance) -> Vector2<f64> {
    let det = gtg.determinant();
    let trace = gtg.trace();
    if !(det > tol.rel * trace * trace) {
        return Vector2::zeros();
    }
    match gtg.try_inverse() {
        Some(inv) => {
            let o = inv * gth;
            if o.x.is_finite() && o.y.is_finite() {
                o
            } else {
                Vector2::zeros()
            }
        }
        None => Vector2::zeros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn run(problem: &Problem) -> (Result<Conditioned, SolveError>, Vec<HalfPlane>, Vec<usize>) {
        let mut hps = Vec::new();
        let mut src = Vec::new();
        let out = condition(problem, &Tolerance::default(), &mut hps, &mut src);
        (out, hps, src)
    }

    #[test]
    fn drops_trivial_and_flags_contradictory_zero_normals() {
        let p = Problem::new(
            vector![0.0, 1.0],
            vec![
                HalfPlane::from_coeffs(0.0, 0.0, -1.0),
                HalfPlane::from_coeffs(2.0, 0.0, 2.0),
            ],
        );
        let (out, hps, src) = run(&p);
        assert!(matches!(out, Ok(Conditioned::Ready { .. })));
        assert_eq!(hps.len(), 1);
        assert_eq!(src, vec![1]);
        assert!((hps[0].n - vector![1.0, 0.0]).norm() < 1e-12);

        let q = Problem::new(
            vector![0.0, 1.0],
            vec![
                HalfPlane::from_coeffs(1.0, 0.0, 0.0),
                HalfPlane::from_coeffs(0.0, 0.0, 0.5),
            ],
        );
        let (out, _, _) = run(&q);
        assert_eq!(out, Ok(Conditioned::Infeasible { constraint: 1 }));
    }

    #[test]
    fn zero_and_non_finite_inputs_are_errors() {
        let p = Problem::new(vector![0.0, 0.0], vec![]);
        assert_eq!(run(&p).0, Err(SolveError::ZeroGradient));
        let q = Problem::new(
            vector![1.0, 0.0],
            vec![HalfPlane::from_coeffs(f64::NAN, 0.0, 0.0)],
        );
        assert_eq!(
            run(&q).0,
            Err(SolveError::NonFinite {
                constraint: Some(0)
            })
        );
        let r = Problem::new(
            vector![1.0, 0.0],
            vec![
                HalfPlane::from_coeffs(0.0, 0.0, 1.0),
                HalfPlane::from_coeffs(1.0, f64::INFINITY, 0.0),
            ],
        );
        assert_eq!(
            run(&r).0,
            Err(SolveError::NonFinite {
                constraint: Some(1)
            })
        );
    }

    #[test]
    fn extreme_coefficients_are_rescaled_not_dropped() {
        let p = Problem::new(
            vector![1e200, 1e200],
            vec![
                HalfPlane::from_coeffs(1e200, 1e200, 1e200),
                HalfPlane::from_coeffs(1e-200, 0.0, 1e-200),
            ],
        );
        let (out, hps, src) = run(&p);
        match out {
            Ok(Conditioned::Ready { c, .. }) => {
                assert!((c - vector![1.0, 1.0] / 2f64.sqrt()).norm() < 1e-12)
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(src, vec![0, 1]);
        for hp in &hps {
            assert!((hp.n.norm() - 1.0).abs() < 1e-12);
        }

        // 1e-300·x >= 1e300 cannot hold anywhere representable.
        let q = Problem::new(
            vector![1.0, 0.0],
            vec![HalfPlane::from_coeffs(1e-300, 0.0, 1e300)],
        );
        assert_eq!(run(&q).0, Ok(Conditioned::Infeasible { constraint: 0 }));
    }

    #[test]
    fn centre_recovers_common_point() {
        // Three lines through (2, -1): the least-squares centre is that point,
        // and every shifted offset becomes zero.
        let p = Problem::new(
            vector![1.0, 1.0],
            vec![
                HalfPlane::from_coeffs(1.0, 0.0, 2.0),
                HalfPlane::from_coeffs(0.0, 3.0, -3.0),
                HalfPlane::from_coeffs(1.0, 1.0, 1.0),
            ],
        );
        let (out, hps, _) = run(&p);
        match out {
            Ok(Conditioned::Ready { c, offset }) => {
                assert!((offset - vector![2.0, -1.0]).norm() < 1e-9);
                assert!((c.norm() - 1.0).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
        for hp in hps {
            assert!(hp.h.abs() < 1e-9);
        }
    }

    #[test]
    fn parallel_family_is_not_centred() {
        let p = Problem::new(
            vector![0.0, 1.0],
            vec![
                HalfPlane::from_coeffs(0.0, 1.0, 1.0),
                HalfPlane::from_coeffs(0.0, -1.0, -3.0),
            ],
        );
        match run(&p).0 {
            Ok(Conditioned::Ready { offset, .. }) => assert_eq!(offset, Vector2::zeros()),
            other => panic!("unexpected {other:?}"),
        }
    }
}
