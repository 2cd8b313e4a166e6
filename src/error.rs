//! Application error type.
//!
//! Fatal failures carry an exit code consumed by `main`:
//!
//! - 2 = input/configuration
//! - 3 = data (too few usable samples)
//! - 4 = fit/render
//!
//! Row-level parse problems are deliberately *not* errors; the loader records
//! and reports them (`io::ingest::RowError`) and the run continues.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Unreadable input file or an invalid configuration value.
    #[error("{0}")]
    Input(String),

    /// Fewer samples than the three free model parameters require.
    #[error(
        "Insufficient data: {retained} usable sample(s) after filtering, need at least {needed}."
    )]
    InsufficientData { retained: usize, needed: usize },

    /// The optimizer exhausted its iteration budget.
    #[error("Fit did not converge within {iterations} iterations (last SSE {sse:.6}).")]
    FitDidNotConverge { iterations: usize, sse: f64 },

    /// Singular system or a meaningless radius estimate.
    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    /// Terminal setup/draw failure in the chart front-end.
    #[error("{0}")]
    Render(String),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Input(_) => 2,
            AppError::InsufficientData { .. } => 3,
            AppError::FitDidNotConverge { .. }
            | AppError::DegenerateFit(_)
            | AppError::Render(_) => 4,
        }
    }
}
