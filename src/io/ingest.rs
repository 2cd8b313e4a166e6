//! Profile ingest and validation.
//!
//! This module is responsible for turning a delimited intensity-profile
//! export (position, intensity rows) into a clean sample list that is safe
//! to filter and fit.
//!
//! Design goals:
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **No fatal row errors**: only an unreadable file aborts the run
//! - **Separation of concerns**: no filtering or fitting logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::domain::{DatasetStats, Sample};
use crate::error::AppError;

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number in the input file.
    pub line: usize,
    pub message: String,
}

/// Ingest output: ordered samples + row diagnostics.
#[derive(Debug, Clone)]
pub struct ProfileData {
    pub samples: Vec<Sample>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load a two-column (position, intensity) profile from a file.
///
/// `background` is subtracted from every intensity before storage. Rows that
/// fail to parse (headers, short rows, non-numeric or non-finite fields) are
/// skipped and reported; input order is preserved among retained rows.
pub fn load_profile(path: &Path, background: f64) -> Result<ProfileData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::Input(format!("Failed to open profile '{}': {e}", path.display()))
    })?;
    Ok(read_profile(file, background))
}

/// Ingest a profile from any reader. Never fails: an empty or fully
/// malformed input yields an empty sample list (the fit engine reports
/// insufficient data later).
pub fn read_profile<R: Read>(reader: R, background: f64) -> ProfileData {
    // Profiles are headerless exports; a header line, if present, simply
    // fails to parse and is reported like any other malformed row.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record) {
            Ok((position, intensity)) => samples.push(Sample {
                position,
                intensity: intensity - background,
            }),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    ProfileData {
        samples,
        row_errors,
        rows_read,
    }
}

fn parse_row(record: &StringRecord) -> Result<(f64, f64), String> {
    if record.len() < 2 {
        return Err(format!(
            "Expected at least 2 fields, found {}.",
            record.len()
        ));
    }
    let position = parse_field(record.get(0), "position")?;
    let intensity = parse_field(record.get(1), "intensity")?;
    Ok((position, intensity))
}

fn parse_field(value: Option<&str>, name: &str) -> Result<f64, String> {
    let raw = value.map(str::trim).unwrap_or("");
    let parsed: f64 = raw
        .parse()
        .map_err(|_| format!("Invalid {name} value '{raw}'."))?;
    if !parsed.is_finite() {
        return Err(format!("Non-finite {name} value '{raw}'."));
    }
    Ok(parsed)
}

/// Summary stats for a sample list; `None` when it is empty.
pub fn compute_stats(samples: &[Sample]) -> Option<DatasetStats> {
    let first = samples.first()?;
    let mut stats = DatasetStats {
        n_points: samples.len(),
        x_min: first.position,
        x_max: first.position,
        y_min: first.intensity,
        y_max: first.intensity,
    };
    for s in &samples[1..] {
        stats.x_min = stats.x_min.min(s.position);
        stats.x_max = stats.x_max.max(s.position);
        stats.y_min = stats.y_min.min(s.intensity);
        stats.y_max = stats.y_max.max(s.intensity);
    }
    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_well_formed_rows_in_order() {
        let data = read_profile(&b"0,10\n1,50\n2,200\n"[..], 0.0);
        assert_eq!(data.rows_read, 3);
        assert!(data.row_errors.is_empty());
        let positions: Vec<f64> = data.samples.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 1.0, 2.0]);
        assert_eq!(data.samples[2].intensity, 200.0);
    }

    #[test]
    fn skips_header_row_with_diagnostic() {
        let data = read_profile(&b"Position,Gray_Value\n0,10\n1,50\n"[..], 0.0);
        assert_eq!(data.samples.len(), 2);
        assert_eq!(data.row_errors.len(), 1);
        assert_eq!(data.row_errors[0].line, 1);
        assert!(data.row_errors[0].message.contains("position"));
    }

    #[test]
    fn skips_non_numeric_row_without_affecting_neighbors() {
        let data = read_profile(&b"0,10\na,b\n2,30\n"[..], 0.0);
        assert_eq!(data.samples.len(), 2);
        assert_eq!(data.row_errors.len(), 1);
        assert_eq!(data.row_errors[0].line, 2);
        assert_eq!(data.samples[1].position, 2.0);
    }

    #[test]
    fn skips_short_and_non_finite_rows() {
        let data = read_profile(&b"5\n1,NaN\n2,inf\n3,7.5\n"[..], 0.0);
        assert_eq!(data.samples.len(), 1);
        assert_eq!(data.row_errors.len(), 3);
        assert!(data.row_errors[0].message.contains("2 fields"));
        assert!(data.row_errors[1].message.contains("Non-finite"));
    }

    #[test]
    fn subtracts_background_before_storage() {
        let data = read_profile(&b"0,100\n1,12.5\n"[..], 10.0);
        assert_eq!(data.samples[0].intensity, 90.0);
        assert_eq!(data.samples[1].intensity, 2.5);
    }

    #[test]
    fn empty_input_yields_empty_profile_not_an_error() {
        let data = read_profile(&b""[..], 0.0);
        assert!(data.samples.is_empty());
        assert_eq!(data.rows_read, 0);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = load_profile(Path::new("does/not/exist.csv"), 0.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn stats_cover_both_ranges() {
        let samples = vec![
            Sample {
                position: 1.0,
                intensity: 5.0,
            },
            Sample {
                position: -2.0,
                intensity: 42.0,
            },
            Sample {
                position: 4.0,
                intensity: 9.0,
            },
        ];
        let stats = compute_stats(&samples).unwrap();
        assert_eq!(stats.n_points, 3);
        assert_eq!((stats.x_min, stats.x_max), (-2.0, 4.0));
        assert_eq!((stats.y_min, stats.y_max), (5.0, 42.0));
        assert!(compute_stats(&[]).is_none());
    }
}
