//! Initial-guess heuristics for the Gaussian fit.
//!
//! Least squares needs a starting point. The guesses are:
//!
//! - `i0`: the saturation cutoff (minus background), assuming the sensor was
//!   near saturation at the center before the filter removed the peak
//! - `x0`: midpoint of the observed position range
//! - `r0`: 35% of the observed position range

use crate::domain::{GaussianParams, Sample};
use crate::error::AppError;

/// Build the heuristic starting point for the optimizer.
///
/// Fails when the samples have no positional spread: a width cannot be
/// estimated from a single position, and the zero-radius start it would
/// imply is undefined in the model.
pub fn initial_guess(samples: &[Sample], i0_guess: f64) -> Result<GaussianParams, AppError> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for s in samples {
        x_min = x_min.min(s.position);
        x_max = x_max.max(s.position);
    }

    let span = x_max - x_min;
    if !(span.is_finite() && span > 0.0) {
        return Err(AppError::DegenerateFit(
            "samples have no positional spread; cannot seed a radius estimate".to_string(),
        ));
    }

    Ok(GaussianParams {
        i0: i0_guess,
        x0: x_min + 0.5 * span,
        r0: 0.35 * span,
    })
}
