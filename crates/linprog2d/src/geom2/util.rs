use nalgebra::Vector2;

use super::types::{Bound1, HalfPlane, Line, Tolerance};

/// z-component of `a × b`.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// `a` rotated by +90°.
#[inline]
pub fn perp(a: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-a.y, a.x)
}

/// Angle of a normal in (-π, π]; used to build angle-sorted processing orders.
#[inline]
pub fn angle_of(n: Vector2<f64>) -> f64 {
    n.y.atan2(n.x)
}

/// Unit vector along `v`, or `None` for zero / non-finite input.
#[inline]
pub fn unit(v: Vector2<f64>) -> Option<Vector2<f64>> {
    let scale = v.amax();
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }
    let v = v / scale;
    Some(v / v.norm())
}

/// Whether two normals are parallel (or anti-parallel) under `tol`.
#[inline]
pub fn is_parallel(a: Vector2<f64>, b: Vector2<f64>, tol: &Tolerance) -> bool {
    tol.is_zero(cross(a, b) / (a.norm() * b.norm()))
}

/// Intersection of the boundary lines of `a` and `b`; `None` if they are parallel.
pub fn intersect(a: &HalfPlane, b: &HalfPlane, tol: &Tolerance) -> Option<Vector2<f64>> {
    if is_parallel(a.n, b.n, tol) {
        return None;
    }
    let den = cross(a.n, b.n);
    let x = (a.h * b.n.y - b.h * a.n.y) / den;
    let y = (b.h * a.n.x - a.h * b.n.x) / den;
    Some(Vector2::new(x, y))
}

/// Signed Euclidean distance of `p` from the boundary of `hp` (positive inside).
#[inline]
pub fn signed_distance(hp: &HalfPlane, p: Vector2<f64>) -> f64 {
    hp.eval(p) / hp.n.norm()
}

/// Bound on `t` from the scalar inequality `slope·t + at_zero >= rhs`.
///
/// A slope within tolerance of zero makes the inequality independent of `t`.
pub fn bound_from(slope: f64, at_zero: f64, rhs: f64, tol: &Tolerance) -> Bound1 {
    if tol.is_zero(slope) {
        if tol.geq(at_zero, rhs) {
            Bound1::Always
        } else {
            Bound1::Never
        }
    } else if slope > 0.0 {
        Bound1::Lower((rhs - at_zero) / slope)
    } else {
        Bound1::Upper((rhs - at_zero) / slope)
    }
}

/// Restrict `hp` to `line`: `n·(anchor + t·dir) >= h`.
///
/// Expects a unit normal (conditioned problems) so that the parallel test on
/// `n·dir` and the shared tolerance agree.
#[inline]
pub fn project(hp: &HalfPlane, line: &Line, tol: &Tolerance) -> Bound1 {
    bound_from(hp.n.dot(&line.dir), hp.n.dot(&line.anchor), hp.h, tol)
}
