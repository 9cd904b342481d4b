//! Solve outcomes and the fixed-layout result record.
//!
//! - `Outcome`: tagged result used inside Rust.
//! - `Status`: stable numeric status codes (`ERROR=0 … POINT=4`).
//! - `RawResult`: `#[repr(C)]` record `{x1, y1, x2, y2, status}` handed across
//!   the C ABI and to the Python binding.
//!
//! The codes and the record layout are part of the external ABI; do not renumber.

use std::fmt;

use nalgebra::Vector2;

use crate::solver::SolveError;

/// Terminal state of a solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// The half-planes have an empty intersection.
    Infeasible,
    /// Feasible, but no finite minimum (or the optimal set is infinite).
    Unbounded,
    /// The minimum is attained along the segment between the two points.
    /// Endpoint order is unspecified.
    Edge(Vector2<f64>, Vector2<f64>),
    /// Unique minimizer.
    Point(Vector2<f64>),
}

impl Outcome {
    pub fn status(&self) -> Status {
        match self {
            Outcome::Infeasible => Status::Infeasible,
            Outcome::Unbounded => Status::Unbounded,
            Outcome::Edge(..) => Status::Edge,
            Outcome::Point(_) => Status::Point,
        }
    }

    /// Any optimal point (the first endpoint for edges).
    pub fn point(&self) -> Option<Vector2<f64>> {
        match *self {
            Outcome::Edge(p, _) | Outcome::Point(p) => Some(p),
            _ => None,
        }
    }

    /// Translate reported points by `offset`.
    pub(crate) fn translated(self, offset: Vector2<f64>) -> Outcome {
        match self {
            Outcome::Edge(a, b) => Outcome::Edge(a + offset, b + offset),
            Outcome::Point(p) => Outcome::Point(p + offset),
            other => other,
        }
    }
}

/// External status codes.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Zero gradient, malformed input, or allocation failure.
    Error = 0,
    Infeasible = 1,
    Unbounded = 2,
    Edge = 3,
    Point = 4,
}

impl Status {
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Error => "error",
            Status::Infeasible => "infeasible",
            Status::Unbounded => "unbounded",
            Status::Edge => "edge",
            Status::Point => "point",
        }
    }
}

impl TryFrom<u32> for Status {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, u32> {
        match code {
            0 => Ok(Status::Error),
            1 => Ok(Status::Infeasible),
            2 => Ok(Status::Unbounded),
            3 => Ok(Status::Edge),
            4 => Ok(Status::Point),
            other => Err(other),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-layout result record. Coordinates not used by `status` are zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawResult {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub status: Status,
}

impl RawResult {
    #[inline]
    fn with_status(status: Status) -> Self {
        Self {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
            status,
        }
    }

    pub fn error() -> Self {
        Self::with_status(Status::Error)
    }

    /// Decode back into an `Outcome`; `None` for `Status::Error`.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Error => None,
            Status::Infeasible => Some(Outcome::Infeasible),
            Status::Unbounded => Some(Outcome::Unbounded),
            Status::Edge => Some(Outcome::Edge(
                Vector2::new(self.x1, self.y1),
                Vector2::new(self.x2, self.y2),
            )),
            Status::Point => Some(Outcome::Point(Vector2::new(self.x1, self.y1))),
        }
    }
}

impl From<Outcome> for RawResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Infeasible => Self::with_status(Status::Infeasible),
            Outcome::Unbounded => Self::with_status(Status::Unbounded),
            Outcome::Edge(a, b) => Self {
                x1: a.x,
                y1: a.y,
                x2: b.x,
                y2: b.y,
                status: Status::Edge,
            },
            Outcome::Point(p) => Self {
                x1: p.x,
                y1: p.y,
                x2: 0.0,
                y2: 0.0,
                status: Status::Point,
            },
        }
    }
}

impl From<Result<Outcome, SolveError>> for RawResult {
    fn from(res: Result<Outcome, SolveError>) -> Self {
        match res {
            Ok(outcome) => outcome.into(),
            Err(_) => Self::error(),
        }
    }
}
