//! Command-line parsing for the beam-radius analyzer.
//!
//! The surface is deliberately positional-only (no flags, no subcommands):
//! the profile file and the saturation cutoff, both optional. Everything
//! else (the background level) comes from the environment, keeping the
//! invocation as small as the measurement workflow it serves.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::AnalysisConfig;
use crate::error::AppError;

/// Default profile bundled with the repository.
pub const DEFAULT_PROFILE: &str = "data/ex_profile.csv";

/// Full 8-bit grayscale saturation.
pub const DEFAULT_CUTOFF: f64 = 255.0;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "beamr",
    version,
    about = "Estimate a laser beam's 1/e^2 radius from a CCD intensity profile"
)]
pub struct Cli {
    /// Profile file: delimited rows of (position, intensity).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Saturation cutoff; readings at or above it are ignored during fitting.
    #[arg(value_name = "CUTOFF")]
    pub cutoff: Option<f64>,
}

/// Resolve the CLI + environment into the run configuration.
///
/// The background level comes from `BEAM_BACKGROUND` (a `.env` file is
/// honored if present) because the CLI surface carries only the file and the
/// cutoff.
pub fn analysis_config(cli: &Cli) -> Result<AnalysisConfig, AppError> {
    let _ = dotenvy::dotenv();

    let cutoff = cli.cutoff.unwrap_or(DEFAULT_CUTOFF);
    if !cutoff.is_finite() {
        return Err(AppError::Input(format!(
            "Cutoff must be a finite number, got '{cutoff}'."
        )));
    }

    let background = match std::env::var("BEAM_BACKGROUND") {
        Ok(raw) => parse_background(&raw)?,
        Err(_) => 0.0,
    };

    Ok(AnalysisConfig {
        file: cli
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE)),
        cutoff,
        background,
    })
}

fn parse_background(raw: &str) -> Result<f64, AppError> {
    let parsed: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Input(format!("Invalid BEAM_BACKGROUND value '{raw}'.")))?;
    if !parsed.is_finite() {
        return Err(AppError::Input(format!(
            "BEAM_BACKGROUND must be finite, got '{raw}'."
        )));
    }
    Ok(parsed)
}
