//! Damped least-squares (Levenberg–Marquardt) fit of the Gaussian model.
//!
//! Given filtered samples `(x_i, y_i)` we minimize
//!
//! ```text
//! SSE(i0, x0, r0) = Σ (y_i - I(x_i))²
//! ```
//!
//! starting from the heuristic guess. Each iteration solves the damped
//! normal equations for a parameter step; a step that does not increase the
//! SSE is accepted (damping relaxed), otherwise it is rejected (damping
//! raised). The engine fails explicitly rather than returning a parameter
//! set it could not justify.

use nalgebra::{DMatrix, DVector};

use crate::domain::{FitQuality, GaussianFit, GaussianParams, Sample};
use crate::error::AppError;
use crate::fit::guess::initial_guess;
use crate::math::solve_normal_eqs;
use crate::model;

/// Three free parameters, so three samples is the minimum determined fit.
pub const MIN_SAMPLES: usize = 3;

/// Radii below this are treated as collapsed (the model divides by `r0²`).
const R0_FLOOR: f64 = 1e-12;

/// Fitting options.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Starting amplitude (the saturation cutoff minus background).
    pub i0_guess: f64,
    /// Iteration budget before giving up.
    pub max_iterations: usize,
    /// Convergence threshold on the scaled parameter step.
    pub step_tolerance: f64,
    /// Initial damping parameter.
    pub initial_lambda: f64,
    /// Damping multiplier on a rejected step.
    pub lambda_up: f64,
    /// Damping multiplier on an accepted step.
    pub lambda_down: f64,
    /// Damping ceiling; beyond it no useful step exists.
    pub lambda_ceiling: f64,
}

impl FitOptions {
    /// Default optimizer settings for a given amplitude guess.
    pub fn new(i0_guess: f64) -> Self {
        Self {
            i0_guess,
            max_iterations: 100,
            step_tolerance: 1e-8,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            lambda_ceiling: 1e10,
        }
    }
}

/// Fit the Gaussian beam model to filtered samples.
///
/// Failure modes are explicit: too few samples, an iteration budget that runs
/// out, or a system/radius the data cannot support. No partial parameters are
/// ever returned.
pub fn fit_gaussian(samples: &[Sample], opts: &FitOptions) -> Result<GaussianFit, AppError> {
    if samples.len() < MIN_SAMPLES {
        return Err(AppError::InsufficientData {
            retained: samples.len(),
            needed: MIN_SAMPLES,
        });
    }

    let positions: Vec<f64> = samples.iter().map(|s| s.position).collect();
    let observed: Vec<f64> = samples.iter().map(|s| s.intensity).collect();

    let mut params = initial_guess(samples, opts.i0_guess)?;
    let mut lambda = opts.initial_lambda;
    let mut sse = sum_squared_residuals(&params, &positions, &observed);
    let mut iterations = 0usize;
    let mut converged = false;

    while iterations < opts.max_iterations {
        iterations += 1;

        let (normal, gradient) = build_normal_eqs(&params, &positions, &observed, lambda);

        let delta = match solve_normal_eqs(&normal, &gradient) {
            Some(d) => d,
            None => {
                // Singular at this damping level: raise the damping and try
                // again, like a rejected step.
                lambda *= opts.lambda_up;
                if lambda > opts.lambda_ceiling {
                    return Err(AppError::DegenerateFit(
                        "singular normal equations; the data does not constrain the model"
                            .to_string(),
                    ));
                }
                continue;
            }
        };

        let candidate = GaussianParams {
            i0: params.i0 + delta[0],
            x0: params.x0 + delta[1],
            r0: params.r0 + delta[2],
        };

        // A collapsed or non-finite radius never becomes an intermediate
        // state; such a step is rejected like an SSE increase.
        let usable = candidate.i0.is_finite()
            && candidate.x0.is_finite()
            && candidate.r0.is_finite()
            && candidate.r0.abs() > R0_FLOOR;

        let candidate_sse = if usable {
            sum_squared_residuals(&candidate, &positions, &observed)
        } else {
            f64::INFINITY
        };

        // Non-strict acceptance: an equal-SSE step near the optimum still
        // lets the step-size test terminate the loop.
        if candidate_sse.is_finite() && candidate_sse <= sse {
            let step = scaled_step(&delta, &params);
            params = candidate;
            sse = candidate_sse;
            lambda *= opts.lambda_down;
            if step < opts.step_tolerance {
                converged = true;
                break;
            }
        } else {
            lambda *= opts.lambda_up;
            if lambda > opts.lambda_ceiling {
                return Err(AppError::DegenerateFit(
                    "damping ceiling reached without an improving step".to_string(),
                ));
            }
        }
    }

    if !converged {
        return Err(AppError::FitDidNotConverge { iterations, sse });
    }

    // The model only uses r0², so the sign is not identifiable; report the
    // radius as a positive number.
    let r0 = params.r0.abs();
    if !(params.i0.is_finite() && params.x0.is_finite() && r0.is_finite() && r0 > R0_FLOOR) {
        return Err(AppError::DegenerateFit(format!(
            "converged to an unusable parameter set (i0={}, x0={}, r0={})",
            params.i0, params.x0, params.r0
        )));
    }

    let rmse = (sse / samples.len() as f64).sqrt();
    Ok(GaussianFit {
        params: GaussianParams { r0, ..params },
        quality: FitQuality {
            sse,
            rmse,
            iterations,
        },
    })
}

fn sum_squared_residuals(params: &GaussianParams, positions: &[f64], observed: &[f64]) -> f64 {
    positions
        .iter()
        .zip(observed.iter())
        .map(|(&x, &y)| {
            let r = y - model::eval(params, x);
            r * r
        })
        .sum()
}

/// Build the damped normal equations `(JᵀJ, Jᵀr)` with the Marquardt
/// diagonal scaling `(1 + λ)`.
fn build_normal_eqs(
    params: &GaussianParams,
    positions: &[f64],
    observed: &[f64],
    lambda: f64,
) -> (DMatrix<f64>, DVector<f64>) {
    let n = positions.len();
    let mut jacobian = DMatrix::<f64>::zeros(n, 3);
    let mut residuals = DVector::<f64>::zeros(n);

    for i in 0..n {
        let row = model::jacobian_row(params, positions[i]);
        for j in 0..3 {
            jacobian[(i, j)] = row[j];
        }
        residuals[i] = observed[i] - model::eval(params, positions[i]);
    }

    let mut normal = jacobian.transpose() * &jacobian;
    let gradient = jacobian.transpose() * residuals;
    for j in 0..3 {
        normal[(j, j)] *= 1.0 + lambda;
    }

    (normal, gradient)
}

/// Largest parameter step relative to the current parameter magnitudes.
fn scaled_step(delta: &DVector<f64>, params: &GaussianParams) -> f64 {
    let scales = [
        params.i0.abs().max(1.0),
        params.x0.abs().max(1.0),
        params.r0.abs().max(1.0),
    ];
    (0..3)
        .map(|j| delta[j].abs() / scales[j])
        .fold(0.0, f64::max)
}
