//! Two-dimensional linear programming over half-plane constraints.
//!
//! ```text
//! minimize   cx·x + cy·y
//! subject to gx[i]·x + gy[i]·y >= h[i]
//! ```
//!
//! Layout
//! - `geom2`: vectors, half-planes, lines, projection onto lines, tolerance.
//! - `lp1`: 1-D LP on a line (interval of feasible parameters).
//! - `lp2`: randomized incremental 2-D engine.
//! - `result`: `Outcome`, stable `Status` codes, `#[repr(C)]` `RawResult`.
//! - `solver`: `Problem`, `SolveCfg`, reusable `Solver`, array entry point.
//! - `rand2`: reproducible random feasible problems.

pub mod geom2;
pub mod lp1;
pub mod lp2;
pub mod rand2;
pub mod result;
pub mod solver;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{HalfPlane, Tolerance};
pub use lp2::Order;
pub use nalgebra::Vector2 as Vec2;
pub use result::{Outcome, RawResult, Status};
pub use solver::{solve, solve_arrays, solve_with_cfg, Problem, SolveCfg, SolveError, Solver};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{HalfPlane, Line, Tolerance};
    pub use crate::lp2::Order;
    pub use crate::rand2::{draw_feasible, ProblemCfg, ReplayToken};
    pub use crate::result::{Outcome, RawResult, Status};
    pub use crate::solver::{solve, solve_arrays, Problem, SolveCfg, SolveError, Solver};
    pub use nalgebra::Vector2 as Vec2;
}
