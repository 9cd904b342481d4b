use super::*;
use nalgebra::{vector, Vector2};

#[test]
fn tolerance_feq_abs_and_rel() {
    let tol = Tolerance::new(1e-30, 1e-15);
    assert!(tol.feq(0.0, -0.0));
    assert!(tol.feq(0.0, 1e-31));
    assert!(!tol.feq(0.0, 1.0));
    assert!(!tol.feq(1e-15, 1.01e-15));
    assert!(tol.feq(1.0, 1.0 + 0.1e-15));
    assert!(!tol.feq(-1e-15, -1.01e-15));
    assert!(tol.feq(-1.0, -1.0 + 0.1e-15));
    assert!(tol.feq(1e-15, 1e-15 + 0.1e-30));
}

#[test]
fn tolerance_geq_accepts_slight_violation() {
    let tol = Tolerance::default();
    assert!(tol.geq(2.0, 1.0));
    assert!(tol.geq(1.0 - 1e-13, 1.0));
    assert!(!tol.geq(0.999, 1.0));
}

#[test]
fn halfplane_eval_and_contains() {
    let tol = Tolerance::default();
    // x + y >= 1
    let hp = HalfPlane::from_coeffs(1.0, 1.0, 1.0);
    assert!((hp.eval(vector![1.0, 1.0]) - 1.0).abs() < 1e-12);
    assert!(hp.contains(vector![0.5, 0.5], &tol));
    assert!(!hp.contains(vector![0.0, 0.0], &tol));
    let d = signed_distance(&hp, vector![0.0, 0.0]);
    assert!((d + 1.0 / 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn normalized_rejects_zero_normal() {
    assert!(HalfPlane::from_coeffs(0.0, 0.0, 1.0).normalized().is_none());
    let hp = HalfPlane::from_coeffs(3.0, 4.0, 10.0).normalized().unwrap();
    assert!((hp.n.norm() - 1.0).abs() < 1e-12);
    assert!((hp.h - 2.0).abs() < 1e-12);
}

#[test]
fn normalized_survives_extreme_magnitudes() {
    for scale in [1e300, 1e200, 1e-200, 1e-300] {
        let hp = HalfPlane::from_coeffs(3.0 * scale, -4.0 * scale, 0.0)
            .normalized()
            .unwrap();
        assert!((hp.n - vector![0.6, -0.8]).norm() < 1e-12, "{scale:e}");
        let u = unit(vector![scale, scale]).unwrap();
        assert!((u.norm() - 1.0).abs() < 1e-12, "{scale:e}");
    }
    let hp = HalfPlane::from_coeffs(1e-200, 0.0, 1e-200).normalized().unwrap();
    assert!((hp.h - 1.0).abs() < 1e-12);
    assert!(unit(Vector2::new(f64::INFINITY, 0.0)).is_none());
}

#[test]
fn boundary_line_lies_on_constraint() {
    let hp = HalfPlane::from_coeffs(2.0, -1.0, 3.0);
    let line = hp.boundary();
    assert!((line.dir.norm() - 1.0).abs() < 1e-12);
    for t in [-3.0, 0.0, 2.5] {
        assert!(hp.eval(line.at(t)).abs() < 1e-12);
    }
}

#[test]
fn intersect_lines_and_parallel() {
    let tol = Tolerance::default();
    // x >= 1 and y >= 2 meet at (1, 2)
    let a = HalfPlane::from_coeffs(1.0, 0.0, 1.0);
    let b = HalfPlane::from_coeffs(0.0, 1.0, 2.0);
    let p = intersect(&a, &b, &tol).unwrap();
    assert!((p - vector![1.0, 2.0]).norm() < 1e-12);
    // x + y >= 0 and -x - y >= -3 are parallel
    let c = HalfPlane::from_coeffs(1.0, 1.0, 0.0);
    let d = HalfPlane::from_coeffs(-1.0, -1.0, -3.0);
    assert!(intersect(&c, &d, &tol).is_none());
    assert!(is_parallel(c.n, d.n, &tol));
}

#[test]
fn project_classifies_bounds() {
    let tol = Tolerance::default();
    // Line y = 0 running along +x.
    let line = Line {
        anchor: Vector2::zeros(),
        dir: vector![1.0, 0.0],
    };
    assert_eq!(
        project(&HalfPlane::from_coeffs(1.0, 0.0, 2.0), &line, &tol),
        Bound1::Lower(2.0)
    );
    assert_eq!(
        project(&HalfPlane::from_coeffs(-1.0, 0.0, -3.0), &line, &tol),
        Bound1::Upper(3.0)
    );
    // Parallel constraints: y >= -1 holds everywhere, y >= 1 nowhere.
    assert_eq!(
        project(&HalfPlane::from_coeffs(0.0, 1.0, -1.0), &line, &tol),
        Bound1::Always
    );
    assert_eq!(
        project(&HalfPlane::from_coeffs(0.0, 1.0, 1.0), &line, &tol),
        Bound1::Never
    );
}

#[test]
fn cross_perp_and_angle() {
    let a = vector![1.0, 0.0];
    let b = vector![0.0, 2.0];
    assert!((cross(a, b) - 2.0).abs() < 1e-12);
    assert!((perp(a) - vector![0.0, 1.0]).norm() < 1e-12);
    assert!((angle_of(b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!(unit(Vector2::zeros()).is_none());
}
