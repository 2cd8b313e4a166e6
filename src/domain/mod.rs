//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - measured profile points (`Sample`)
//! - fit outputs (`GaussianParams`, `GaussianFit`, `FitQuality`)
//! - run configuration (`AnalysisConfig`) and dataset summaries

pub mod types;

pub use types::*;
