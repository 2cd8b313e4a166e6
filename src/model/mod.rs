//! Gaussian beam model evaluation.
//!
//! The fit engine relies on two primitive operations:
//! - predict intensity at a position (for residuals/plots)
//! - build a Jacobian row for the three parameters (for the damped step)
//!
//! Both are pure functions of `GaussianParams`. `r0 = 0` is undefined (the
//! model divides by `r0^2`); the fit engine never evaluates it.

use crate::domain::GaussianParams;

/// Evaluate `I(x) = i0 * exp(-2 (x - x0)^2 / r0^2)`.
pub fn eval(params: &GaussianParams, x: f64) -> f64 {
    let u = x - params.x0;
    params.i0 * (-2.0 * u * u / (params.r0 * params.r0)).exp()
}

/// Evaluate the model over a slice of positions.
pub fn eval_many(params: &GaussianParams, positions: &[f64]) -> Vec<f64> {
    positions.iter().map(|&x| eval(params, x)).collect()
}

/// Partial derivatives of the model w.r.t. `(i0, x0, r0)` at `x`.
pub fn jacobian_row(params: &GaussianParams, x: f64) -> [f64; 3] {
    let u = x - params.x0;
    let r2 = params.r0 * params.r0;
    let e = (-2.0 * u * u / r2).exp();
    [
        e,
        params.i0 * e * 4.0 * u / r2,
        params.i0 * e * 4.0 * u * u / (r2 * params.r0),
    ]
}

/// Sample the curve on a dense grid spanning `[x_min, x_max]` (inclusive).
///
/// Used for chart rendering; `n` is clamped to at least 2 so the grid always
/// contains both endpoints.
pub fn sample_curve(
    params: &GaussianParams,
    x_min: f64,
    x_max: f64,
    n: usize,
) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push((x, eval(params, x)));
    }
    out
}
