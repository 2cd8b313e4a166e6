//! Damped least-squares step solver.
//!
//! Each fit iteration solves a small symmetric system `A δ = g` where `A` is
//! the damped normal matrix `JᵀJ` (diagonal scaled by `1 + λ`) and `g` is the
//! gradient `Jᵀr`.
//!
//! Implementation choices:
//! - The system is tiny (3×3) but can become nearly singular when the data
//!   barely constrains a parameter, so we solve with SVD rather than a
//!   direct inverse.
//! - We try progressively looser tolerances before declaring the system
//!   unsolvable; the caller treats `None` as a rejected step.

use nalgebra::{DMatrix, DVector};

/// Solve the damped normal equations for a parameter step.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_normal_eqs(a: &DMatrix<f64>, g: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = a.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(delta) = svd.solve(g, tol) {
            if delta.iter().all(|v| v.is_finite()) {
                return Some(delta);
            }
        }
    }

    None
}
