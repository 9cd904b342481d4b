//! 2D geometry primitives for half-plane linear programs.
//!
//! Purpose
//! - Points and directions are plain `nalgebra::Vector2<f64>`.
//! - `HalfPlane` encodes a constraint `n·p >= h` ("greater-or-equal" side).
//! - Line intersection, signed distance, and projection of a half-plane onto
//!   another boundary line (yielding a 1-D `Bound1`).
//!
//! Numerics
//! - All predicates take the shared `Tolerance`; nothing in this module keeps
//!   its own epsilon.

mod types;
mod util;

pub use types::{Bound1, HalfPlane, Line, Tolerance};
pub use util::{
    angle_of, bound_from, cross, intersect, is_parallel, perp, project, signed_distance, unit,
};

#[cfg(test)]
mod tests;
