//! Shared analysis pipeline: load -> filter -> fit.
//!
//! Keeping this in one place lets the report and both chart front-ends
//! consume one computed output.

use crate::domain::{AnalysisConfig, DatasetStats, GaussianFit, Sample};
use crate::error::AppError;
use crate::filter::strip_saturated;
use crate::fit::{fit_gaussian, FitOptions, MIN_SAMPLES};
use crate::io::ingest::{self, ProfileData};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Raw ingest result (pre-filter samples + row diagnostics).
    pub ingest: ProfileData,
    /// Samples that survived the saturation filter (the fitted set).
    pub samples: Vec<Sample>,
    /// Count of saturated samples removed.
    pub removed: usize,
    pub stats: DatasetStats,
    pub fit: GaussianFit,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    // 1) Load and validate the profile.
    let ingest = ingest::load_profile(&config.file, config.background)?;

    // 2) Drop saturated readings.
    let outcome = strip_saturated(ingest.samples.clone(), config.cutoff, config.background);

    // 3) Fit the Gaussian model.
    let fit = fit_gaussian(
        &outcome.samples,
        &FitOptions::new(config.cutoff - config.background),
    )?;

    let stats = ingest::compute_stats(&outcome.samples).ok_or(AppError::InsufficientData {
        retained: 0,
        needed: MIN_SAMPLES,
    })?;

    Ok(RunOutput {
        ingest,
        samples: outcome.samples,
        removed: outcome.removed,
        stats,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(file: &str, cutoff: f64, background: f64) -> AnalysisConfig {
        AnalysisConfig {
            file: PathBuf::from(file),
            cutoff,
            background,
        }
    }

    #[test]
    fn bundled_profile_analyzes_end_to_end() {
        // data/ex_profile.csv is a noisy Gaussian (i0=300, x0=20, r0=6) with
        // a header row and a clipped plateau at 255.
        let output = run_analysis(&config("data/ex_profile.csv", 255.0, 0.0)).unwrap();

        assert_eq!(output.ingest.row_errors.len(), 1);
        assert_eq!(output.removed, 3);
        assert_eq!(output.stats.n_points, output.samples.len());
        assert!(output.samples.iter().all(|s| s.intensity < 255.0));

        let p = output.fit.params;
        assert!((p.x0 - 20.0).abs() < 0.2, "x0 = {}", p.x0);
        assert!((p.r0 - 6.0).abs() < 0.2, "r0 = {}", p.r0);
        assert!((p.i0 - 300.0).abs() < 10.0, "i0 = {}", p.i0);
    }

    #[test]
    fn cutoff_below_every_reading_is_insufficient_data() {
        let err = run_analysis(&config("data/ex_profile.csv", 0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientData {
                retained: 0,
                needed: 3
            }
        ));
    }

    #[test]
    fn missing_profile_is_an_input_error() {
        let err = run_analysis(&config("data/no_such_profile.csv", 255.0, 0.0)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
