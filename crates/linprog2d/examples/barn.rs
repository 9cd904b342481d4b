//! Small production-planning LP solved through the array entry point.
//!
//! maximize   5x + 10y
//! subject to 0 <= x <= 15, y >= 0, 8x + 8y <= 160, 4x + 12y <= 180
//!
//! Constraints are written as `gx·x + gy·y >= h`, so `<=` rows are negated and
//! the objective is minimized as `-5x - 10y`.

use linprog2d::{solve_arrays, Status};

fn main() {
    let gx = [1.0, 0.0, -1.0, -8.0, -4.0];
    let gy = [0.0, 1.0, 0.0, -8.0, -12.0];
    let h = [0.0, 0.0, -15.0, -160.0, -180.0];

    let res = solve_arrays(-5.0, -10.0, &gx, &gy, &h);
    match res.status {
        Status::Point => {
            println!("x={:.2} y={:.2}", res.x1, res.y1);
            println!("profit={:.2}", 5.0 * res.x1 + 10.0 * res.y1);
        }
        other => {
            eprintln!("no single optimal point: {other}");
            std::process::exit(1);
        }
    }
}
