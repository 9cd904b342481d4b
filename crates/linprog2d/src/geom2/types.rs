//! Basic 2D types and the shared tolerance.
//!
//! - `Tolerance`: the single absolute + relative epsilon used by every component.
//! - `HalfPlane`: closed half-plane `n·p >= h` with helper predicates.
//! - `Line`: parametrized boundary line `anchor + t·dir` with unit `dir`.
//! - `Bound1`: restriction of a half-plane to a line (consumed by `lp1`).
//!
//! Code cross-refs: `util::{intersect, project}`, `lp1::Interval1`

use nalgebra::Vector2;

use super::util::perp;

/// Absolute + relative tolerance shared by all equality and parallelism tests.
///
/// Mixing tolerances across primitives flips edge/point classifications, so the
/// engine threads one value through geometry, the 1-D solver and the classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerance {
    #[inline]
    pub fn new(abs: f64, rel: f64) -> Self {
        Self { abs, rel }
    }

    /// `a ≈ b` under the absolute or the relative bound.
    #[inline]
    pub fn feq(&self, a: f64, b: f64) -> bool {
        let d = (a - b).abs();
        d <= self.abs || d <= self.rel * a.abs().max(b.abs())
    }

    /// `a >= b`, accepting `a` slightly below `b`.
    #[inline]
    pub fn geq(&self, a: f64, b: f64) -> bool {
        a >= b || self.feq(a, b)
    }

    /// Zero test for quantities built from unit vectors (dot/cross products).
    #[inline]
    pub fn is_zero(&self, x: f64) -> bool {
        x.abs() <= self.abs
    }
}

/// Closed half-plane `n · p >= h`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfPlane {
    pub n: Vector2<f64>,
    pub h: f64,
}

impl HalfPlane {
    #[inline]
    pub fn new(n: Vector2<f64>, h: f64) -> Self {
        Self { n, h }
    }

    /// Half-plane `gx·x + gy·y >= h`.
    #[inline]
    pub fn from_coeffs(gx: f64, gy: f64, h: f64) -> Self {
        Self::new(Vector2::new(gx, gy), h)
    }

    /// Signed margin `n·p - h`; non-negative inside.
    #[inline]
    pub fn eval(&self, p: Vector2<f64>) -> f64 {
        self.n.dot(&p) - self.h
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>, tol: &Tolerance) -> bool {
        tol.geq(self.n.dot(&p), self.h)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.n.x.is_finite() && self.n.y.is_finite() && self.h.is_finite()
    }

    /// Same half-plane with a unit normal. `None` for a zero (or non-finite) normal.
    #[inline]
    pub fn normalized(&self) -> Option<HalfPlane> {
        // Divide by the largest component first so the norm cannot over- or underflow.
        let scale = self.n.amax();
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let n = self.n / scale;
        let norm = n.norm();
        Some(Self::new(n / norm, self.h / scale / norm))
    }

    /// Boundary line `n·p = h`; the normal must be non-zero.
    pub fn boundary(&self) -> Line {
        let nn = self.n.norm_squared();
        Line {
            anchor: self.n * (self.h / nn),
            dir: perp(self.n) / nn.sqrt(),
        }
    }
}

/// Line `anchor + t · dir` with unit `dir`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub anchor: Vector2<f64>,
    pub dir: Vector2<f64>,
}

impl Line {
    #[inline]
    pub fn at(&self, t: f64) -> Vector2<f64> {
        self.anchor + self.dir * t
    }
}

/// A half-plane restricted to a line, in terms of the line parameter `t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound1 {
    /// `t >= value`
    Lower(f64),
    /// `t <= value`
    Upper(f64),
    /// Parallel and satisfied along the whole line.
    Always,
    /// Parallel and violated along the whole line.
    Never,
}
