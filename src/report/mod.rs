//! Formatted terminal output for a completed run.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! The final line of the summary is the tool's contract: the estimated
//! 1/e^2 radius to two decimal places.

use crate::domain::{AnalysisConfig, DatasetStats, GaussianFit};
use crate::io::ingest::ProfileData;

/// Format the full run summary: configuration, ingest diagnostics, filter
/// count, dataset stats, fit diagnostics, and the radius line.
pub fn format_run_summary(
    config: &AnalysisConfig,
    ingest: &ProfileData,
    removed: usize,
    stats: &DatasetStats,
    fit: &GaussianFit,
) -> String {
    let mut out = String::new();

    out.push_str("=== beamr - Gaussian Beam Profile Fit ===\n");
    out.push_str(&format!("Profile: {}\n", config.file.display()));
    out.push_str(&format!(
        "Cutoff: {} | Background: {}\n",
        config.cutoff, config.background
    ));

    out.push_str(&format!(
        "Rows: read={} | used={} | skipped={}\n",
        ingest.rows_read,
        stats.n_points,
        ingest.row_errors.len()
    ));
    for err in &ingest.row_errors {
        out.push_str(&format!("  (skipped line {}) {}\n", err.line, err.message));
    }

    out.push_str(&format!("Removed {removed} saturated values\n"));
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.2}, {:.2}]\n",
        stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
    ));

    out.push_str("\nFit diagnostics:\n");
    out.push_str(&format!(
        "- SSE={:.3} RMSE={:.3} iterations={}\n",
        fit.quality.sse, fit.quality.rmse, fit.quality.iterations
    ));
    out.push_str(&format!(
        "- i0={:.4} x0={:.4} r0={:.4}\n",
        fit.params.i0, fit.params.x0, fit.params.r0
    ));

    out.push('\n');
    out.push_str(&format!(
        "Estimated beam radius is {:.2}\n",
        fit.params.r0
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, GaussianParams};
    use crate::io::ingest::RowError;
    use std::path::PathBuf;

    fn fixture() -> (AnalysisConfig, ProfileData, DatasetStats, GaussianFit) {
        let config = AnalysisConfig {
            file: PathBuf::from("profile.csv"),
            cutoff: 255.0,
            background: 0.0,
        };
        let ingest = ProfileData {
            samples: Vec::new(),
            row_errors: vec![RowError {
                line: 1,
                message: "Invalid position value 'Position'.".to_string(),
            }],
            rows_read: 6,
        };
        let stats = DatasetStats {
            n_points: 4,
            x_min: 0.0,
            x_max: 4.0,
            y_min: 10.0,
            y_max: 200.0,
        };
        let fit = GaussianFit {
            params: GaussianParams {
                i0: 201.5,
                x0: 2.004,
                r0: 1.2345,
            },
            quality: FitQuality {
                sse: 12.5,
                rmse: 1.7678,
                iterations: 9,
            },
        };
        (config, ingest, stats, fit)
    }

    #[test]
    fn summary_ends_with_two_decimal_radius_line() {
        let (config, ingest, stats, fit) = fixture();
        let out = format_run_summary(&config, &ingest, 1, &stats, &fit);
        assert!(out.ends_with("Estimated beam radius is 1.23\n"));
    }

    #[test]
    fn summary_reports_skips_and_removals() {
        let (config, ingest, stats, fit) = fixture();
        let out = format_run_summary(&config, &ingest, 3, &stats, &fit);
        assert!(out.contains("Rows: read=6 | used=4 | skipped=1"));
        assert!(out.contains("(skipped line 1) Invalid position value 'Position'."));
        assert!(out.contains("Removed 3 saturated values"));
    }

    #[test]
    fn summary_names_the_profile_and_cutoff() {
        let (config, ingest, stats, fit) = fixture();
        let out = format_run_summary(&config, &ingest, 0, &stats, &fit);
        assert!(out.contains("Profile: profile.csv"));
        assert!(out.contains("Cutoff: 255 | Background: 0"));
    }
}
