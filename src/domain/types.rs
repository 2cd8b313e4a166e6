//! Shared domain types.
//!
//! These types are intentionally kept lightweight: created once during a run,
//! immutable afterwards, and consumed by the report/chart front-ends.

use std::path::PathBuf;

/// One measured profile point: a pixel position and its intensity reading.
///
/// `intensity` is stored with the configured background already subtracted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: f64,
    pub intensity: f64,
}

/// Fitted Gaussian beam parameters.
///
/// The model is `I(x) = i0 * exp(-2 (x - x0)^2 / r0^2)`, so `r0` is the 1/e^2
/// radius: at `x = x0 ± r0` the intensity falls to `i0 / e^2`.
#[derive(Debug, Clone, Copy)]
pub struct GaussianParams {
    /// Peak intensity.
    pub i0: f64,
    /// Beam center position.
    pub x0: f64,
    /// 1/e^2 radius. Reported positive; the model only ever uses `r0^2`.
    pub r0: f64,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub iterations: usize,
}

/// Fit engine output: best-fit parameters plus diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct GaussianFit {
    pub params: GaussianParams,
    pub quality: FitQuality,
}

/// Summary stats about the samples actually used for fitting.
#[derive(Debug, Clone, Copy)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from the two positional CLI arguments plus environment
/// defaults; see `cli::analysis_config`.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Profile file path (positional argument 1).
    pub file: PathBuf,
    /// Saturation cutoff in raw intensity units (positional argument 2).
    ///
    /// Readings at or above this value are discarded before fitting.
    pub cutoff: f64,
    /// Constant background subtracted from every intensity reading
    /// (`BEAM_BACKGROUND`, default 0).
    pub background: f64,
}
