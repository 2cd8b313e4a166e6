//! Saturation filtering.
//!
//! Sensor saturation flattens the true peak, which biases both the amplitude
//! and the radius of a least-squares Gaussian fit. Samples at or above the
//! cutoff are removed outright rather than clipped: a clipped value would
//! still distort the squared-residual objective.

use crate::domain::Sample;

/// Result of a saturation pass: retained samples + removed count.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub samples: Vec<Sample>,
    pub removed: usize,
}

/// Remove every sample whose intensity is at or above `cutoff - background`.
///
/// Intensities are stored background-subtracted, so the threshold is shifted
/// by the same amount. Retained samples keep their order and values.
pub fn strip_saturated(samples: Vec<Sample>, cutoff: f64, background: f64) -> FilterOutcome {
    let threshold = cutoff - background;
    let before = samples.len();
    let samples: Vec<Sample> = samples
        .into_iter()
        .filter(|s| s.intensity < threshold)
        .collect();
    let removed = before - samples.len();
    FilterOutcome { samples, removed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(position: f64, intensity: f64) -> Sample {
        Sample {
            position,
            intensity,
        }
    }

    #[test]
    fn removes_samples_at_or_above_threshold() {
        let samples = vec![
            sample(0.0, 10.0),
            sample(1.0, 255.0),
            sample(2.0, 254.9),
            sample(3.0, 300.0),
        ];
        let out = strip_saturated(samples, 255.0, 0.0);
        assert_eq!(out.removed, 2);
        assert!(out.samples.iter().all(|s| s.intensity < 255.0));
    }

    #[test]
    fn threshold_shifts_with_background() {
        // Readings were stored background-subtracted; a raw 255 reading with
        // background 5 is stored as 250 and must still count as saturated.
        let samples = vec![sample(0.0, 250.0), sample(1.0, 249.9)];
        let out = strip_saturated(samples, 255.0, 5.0);
        assert_eq!(out.removed, 1);
        assert_eq!(out.samples[0].intensity, 249.9);
    }

    #[test]
    fn preserves_order_and_values_of_retained_samples() {
        let samples = vec![sample(3.0, 1.0), sample(1.0, 999.0), sample(2.0, 2.0)];
        let out = strip_saturated(samples, 255.0, 0.0);
        let kept: Vec<(f64, f64)> = out.samples.iter().map(|s| (s.position, s.intensity)).collect();
        assert_eq!(kept, vec![(3.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let samples = vec![sample(0.0, 10.0), sample(1.0, 255.0), sample(2.0, 20.0)];
        let once = strip_saturated(samples, 255.0, 0.0);
        let twice = strip_saturated(once.samples.clone(), 255.0, 0.0);
        assert_eq!(twice.removed, 0);
        assert_eq!(twice.samples, once.samples);
    }

    #[test]
    fn fully_saturated_input_empties_the_set() {
        let samples = vec![sample(0.0, 255.0), sample(1.0, 255.0)];
        let out = strip_saturated(samples, 255.0, 0.0);
        assert_eq!(out.removed, 2);
        assert!(out.samples.is_empty());
    }
}
