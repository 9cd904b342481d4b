//! C ABI for `linprog2d`.
//!
//! Entry points
//! - `linprog2d_solve_simple`: one-shot solve, buffers allocated per call.
//! - `linprog2d_create` / `linprog2d_solve` / `linprog2d_capacity` /
//!   `linprog2d_free`: a solver handle with a fixed capacity, reused across
//!   calls. Problems larger than the capacity report `ERROR`.
//!
//! Every function returns a `RawResult` by value; failures (null pointers,
//! zero gradient, allocation, capacity) are encoded as `Status::Error`.
//! See `include/linprog2d.h` for the matching declarations.

use std::os::raw::c_uint;
use std::slice;

use linprog2d::{Problem, RawResult, SolveCfg, Solver};

/// Opaque solver handle.
pub struct Linprog2d {
    solver: Solver,
    capacity: usize,
}

/// View `n` doubles at `ptr`; `None` for a null pointer with `n > 0`.
///
/// # Safety
/// A non-null `ptr` must point to `n` readable doubles.
unsafe fn view<'a>(ptr: *const f64, n: usize) -> Option<&'a [f64]> {
    if n == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    Some(slice::from_raw_parts(ptr, n))
}

/// # Safety
/// Non-null array pointers must each point to `n` readable doubles.
unsafe fn problem_from_raw(
    cx: f64,
    cy: f64,
    gx: *const f64,
    gy: *const f64,
    h: *const f64,
    n: usize,
) -> Option<Problem> {
    let (gx, gy, h) = (view(gx, n)?, view(gy, n)?, view(h, n)?);
    Problem::from_arrays(cx, cy, gx, gy, h).ok()
}

/// Solve one problem, allocating working memory for this call only.
///
/// # Safety
/// `gx`, `gy`, and `h` must each be null or point to `n` readable doubles.
#[no_mangle]
pub unsafe extern "C" fn linprog2d_solve_simple(
    cx: f64,
    cy: f64,
    gx: *const f64,
    gy: *const f64,
    h: *const f64,
    n: c_uint,
) -> RawResult {
    let n = n as usize;
    let Some(problem) = problem_from_raw(cx, cy, gx, gy, h, n) else {
        return RawResult::error();
    };
    match Solver::with_capacity(n, SolveCfg::default()) {
        Ok(mut solver) => solver.solve(&problem).into(),
        Err(_) => RawResult::error(),
    }
}

/// Create a solver for up to `capacity` constraints; null on allocation failure.
#[no_mangle]
pub extern "C" fn linprog2d_create(capacity: c_uint) -> *mut Linprog2d {
    let capacity = capacity as usize;
    match Solver::with_capacity(capacity, SolveCfg::default()) {
        Ok(solver) => Box::into_raw(Box::new(Linprog2d { solver, capacity })),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Number of constraints `prog` accepts; 0 for a null handle.
///
/// # Safety
/// `prog` must be null or a live handle from `linprog2d_create`.
#[no_mangle]
pub unsafe extern "C" fn linprog2d_capacity(prog: *const Linprog2d) -> c_uint {
    match prog.as_ref() {
        Some(prog) => c_uint::try_from(prog.capacity).unwrap_or(c_uint::MAX),
        None => 0,
    }
}

/// Solve with a solver handle.
///
/// # Safety
/// `prog` must be null or a live handle from `linprog2d_create`, not used
/// concurrently. `gx`, `gy`, and `h` must each be null or point to `n`
/// readable doubles.
#[no_mangle]
pub unsafe extern "C" fn linprog2d_solve(
    prog: *mut Linprog2d,
    cx: f64,
    cy: f64,
    gx: *const f64,
    gy: *const f64,
    h: *const f64,
    n: c_uint,
) -> RawResult {
    let Some(prog) = prog.as_mut() else {
        return RawResult::error();
    };
    let n = n as usize;
    if n > prog.capacity {
        return RawResult::error();
    }
    match problem_from_raw(cx, cy, gx, gy, h, n) {
        Some(problem) => prog.solver.solve(&problem).into(),
        None => RawResult::error(),
    }
}

/// Release a handle from `linprog2d_create`. Null is a no-op.
///
/// # Safety
/// `prog` must be null or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn linprog2d_free(prog: *mut Linprog2d) {
    if !prog.is_null() {
        drop(Box::from_raw(prog));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linprog2d::Status;
    use std::ptr;

    const NR_GX: [f64; 3] = [-2.0, 1.0, -1.0];
    const NR_GY: [f64; 3] = [-1.0, 1.0, -3.0];
    const NR_H: [f64; 3] = [-70.0, 40.0, -90.0];

    #[test]
    fn solve_simple_numerical_recipes() {
        let res = unsafe {
            linprog2d_solve_simple(
                -40.0,
                -60.0,
                NR_GX.as_ptr(),
                NR_GY.as_ptr(),
                NR_H.as_ptr(),
                3,
            )
        };
        assert_eq!(res.status, Status::Point);
        assert!((res.x1 - 24.0).abs() < 1e-9);
        assert!((res.y1 - 22.0).abs() < 1e-9);
    }

    #[test]
    fn solve_simple_rejects_null_arrays() {
        let res = unsafe {
            linprog2d_solve_simple(0.0, 1.0, ptr::null(), ptr::null(), ptr::null(), c_uint::MAX)
        };
        assert_eq!(res.status, Status::Error);
        // No constraints: null is fine.
        let res =
            unsafe { linprog2d_solve_simple(0.0, 1.0, ptr::null(), ptr::null(), ptr::null(), 0) };
        assert_eq!(res.status, Status::Unbounded);
    }

    #[test]
    fn handle_lifecycle_and_capacity() {
        let prog = linprog2d_create(128);
        assert!(!prog.is_null());
        unsafe {
            assert_eq!(linprog2d_capacity(prog), 128);
            let res = linprog2d_solve(
                prog,
                -40.0,
                -60.0,
                NR_GX.as_ptr(),
                NR_GY.as_ptr(),
                NR_H.as_ptr(),
                3,
            );
            assert_eq!(res.status, Status::Point);
            linprog2d_free(prog);
        }
    }

    #[test]
    fn problem_larger_than_capacity_is_error() {
        let prog = linprog2d_create(2);
        unsafe {
            let res = linprog2d_solve(
                prog,
                -40.0,
                -60.0,
                NR_GX.as_ptr(),
                NR_GY.as_ptr(),
                NR_H.as_ptr(),
                3,
            );
            assert_eq!(res.status, Status::Error);
            linprog2d_free(prog);
        }
    }

    #[test]
    fn null_handle_is_error() {
        unsafe {
            assert_eq!(linprog2d_capacity(ptr::null()), 0);
            let res = linprog2d_solve(
                ptr::null_mut(),
                1.0,
                0.0,
                ptr::null(),
                ptr::null(),
                ptr::null(),
                0,
            );
            assert_eq!(res.status, Status::Error);
            linprog2d_free(ptr::null_mut());
        }
    }

    #[test]
    fn zero_gradient_is_error() {
        let res = unsafe {
            linprog2d_solve_simple(
                0.0,
                0.0,
                NR_GX.as_ptr(),
                NR_GY.as_ptr(),
                NR_H.as_ptr(),
                3,
            )
        };
        assert_eq!(res.status, Status::Error);
        assert_eq!((res.x1, res.y1, res.x2, res.y2), (0.0, 0.0, 0.0, 0.0));
    }
}
