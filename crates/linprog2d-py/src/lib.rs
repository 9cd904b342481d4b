//! PyO3 bindings for `linprog2d`.
//!
//! Notes
//! - Keep bindings thin; array conversion (NumPy → lists) happens in the
//!   Python wrapper.
//! - `solve` returns `(status, x1, y1, x2, y2)` mirroring the C record, so the
//!   wrapper can build its result object without reinterpreting codes.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use linprog2d::{Problem, RawResult, Status};

/// Status codes exposed as module constants.
const STATUSES: [Status; 5] = [
    Status::Error,
    Status::Infeasible,
    Status::Unbounded,
    Status::Edge,
    Status::Point,
];

/// Minimize `cx·x + cy·y` subject to `gx[i]·x + gy[i]·y >= h[i]`.
///
/// Raises `ValueError` when the three arrays differ in length; every other
/// failure is reported through the status code.
#[pyfunction]
fn solve(
    cx: f64,
    cy: f64,
    gx: Vec<f64>,
    gy: Vec<f64>,
    h: Vec<f64>,
) -> PyResult<(u32, f64, f64, f64, f64)> {
    let problem = Problem::from_arrays(cx, cy, &gx, &gy, &h)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    let res: RawResult = linprog2d::solve(&problem).into();
    Ok((res.status.code(), res.x1, res.y1, res.x2, res.y2))
}

/// Name of a status code (`"point"`, `"edge"`, ...).
#[pyfunction]
fn status_name(code: u32) -> PyResult<&'static str> {
    Status::try_from(code)
        .map(Status::name)
        .map_err(|code| PyValueError::new_err(format!("unknown status code {code}")))
}

#[pymodule]
fn linprog2d_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add_function(wrap_pyfunction!(status_name, m)?)?;
    for status in STATUSES {
        m.add(
            format!("STATUS_{}", status.name().to_uppercase()).as_str(),
            status.code(),
        )?;
    }
    m.add("__version__", linprog2d::VERSION)?;
    Ok(())
}
