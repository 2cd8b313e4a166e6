//! Beam-profile chart widget, drawn with Plotters.
//!
//! Plotters gives us real axes, tick labels, and filled areas for very
//! little code; `plotters-ratatui-backend` maps its drawing primitives onto
//! the terminal buffer, so the same chart description works anywhere
//! Ratatui does.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::app::pipeline::RunOutput;
use crate::model;

/// Number of curve samples across the visible range.
const CURVE_SAMPLES: usize = 200;

/// Precomputed series and bounds for one fitted profile.
///
/// The widget itself is render-only: everything it draws is prepared here as
/// plain data, which keeps the series logic testable without a terminal.
pub struct BeamChart {
    /// Fitted Gaussian across the visible position range.
    curve: Vec<(f64, f64)>,
    /// Measured (position, intensity) samples.
    points: Vec<(f64, f64)>,
    /// Curve segment over `[x0 - r0, x0 + r0]`, drawn as a filled area.
    band: Vec<(f64, f64)>,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl BeamChart {
    pub fn new(output: &RunOutput) -> Self {
        let params = &output.fit.params;

        // Visible range: the fitted data's span, or a window around the
        // fitted beam when the span is degenerate.
        let span_ok = output.stats.x_min.is_finite()
            && output.stats.x_max.is_finite()
            && output.stats.x_max > output.stats.x_min;
        let (x_lo, x_hi) = if span_ok {
            (output.stats.x_min, output.stats.x_max)
        } else {
            (params.x0 - 2.0 * params.r0, params.x0 + 2.0 * params.r0)
        };

        let points: Vec<(f64, f64)> = output
            .samples
            .iter()
            .map(|s| (s.position, s.intensity))
            .collect();
        let curve = model::sample_curve(params, x_lo, x_hi, CURVE_SAMPLES);

        // Beam-width band, clipped to the visible range.
        let band_lo = (params.x0 - params.r0).max(x_lo);
        let band_hi = (params.x0 + params.r0).min(x_hi);
        let band = if band_hi > band_lo {
            model::sample_curve(params, band_lo, band_hi, CURVE_SAMPLES)
        } else {
            Vec::new()
        };

        let mut y_lo = f64::INFINITY;
        let mut y_hi = f64::NEG_INFINITY;
        for &(_, y) in points.iter().chain(curve.iter()) {
            y_lo = y_lo.min(y);
            y_hi = y_hi.max(y);
        }
        if !(y_lo.is_finite() && y_hi.is_finite() && y_hi > y_lo) {
            y_lo = 0.0;
            y_hi = 1.0;
        }

        // The filled band drops to the zero line, so keep zero in view.
        y_lo = y_lo.min(0.0);
        let margin = ((y_hi - y_lo) * 0.05).max(1e-12);

        Self {
            curve,
            points,
            band,
            x_range: (x_lo, x_hi),
            y_range: (y_lo - margin, y_hi + margin),
        }
    }
}

impl Widget for &BeamChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters cannot lay out axes in a handful of cells; show a hint
        // instead of failing the draw.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let (x_lo, x_hi) = self.x_range;
        let (y_lo, y_hi) = self.y_range;
        if !(x_hi > x_lo && y_hi > y_lo) {
            return;
        }

        widget_fn(|root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res; keep the label gutters small.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .x_desc("position (px)")
                .y_desc("intensity")
                .x_label_formatter(&|v| format!("{v:.1}"))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // Shaded 1/e^2 region first so the curve and samples stay on top.
            if self.band.len() >= 2 {
                chart.draw_series(AreaSeries::new(
                    self.band.iter().copied(),
                    0.0,
                    RGBColor(0, 128, 255).mix(0.3),
                ))?;
            }

            chart.draw_series(LineSeries::new(self.curve.iter().copied(), &CYAN))?;

            // `Pixel` rather than `Circle` markers: the backend maps circle
            // radii to normalized canvas units, which blows them up to most
            // of the screen at terminal resolution.
            chart.draw_series(self.points.iter().map(|&p| Pixel::new(p, WHITE)))?;

            Ok(())
        })
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, GaussianFit, GaussianParams, Sample};
    use crate::io::ingest::ProfileData;

    fn run_output() -> RunOutput {
        let params = GaussianParams {
            i0: 200.0,
            x0: 5.0,
            r0: 2.0,
        };
        let samples: Vec<Sample> = (0..=10)
            .map(|i| Sample {
                position: i as f64,
                intensity: model::eval(&params, i as f64),
            })
            .collect();
        RunOutput {
            ingest: ProfileData {
                samples: samples.clone(),
                row_errors: Vec::new(),
                rows_read: samples.len(),
            },
            removed: 0,
            stats: crate::io::ingest::compute_stats(&samples).unwrap(),
            samples,
            fit: GaussianFit {
                params,
                quality: FitQuality {
                    sse: 0.0,
                    rmse: 0.0,
                    iterations: 1,
                },
            },
        }
    }

    #[test]
    fn series_span_the_data_and_band() {
        let chart = BeamChart::new(&run_output());

        assert_eq!(chart.points.len(), 11);
        assert_eq!(chart.curve.len(), CURVE_SAMPLES);
        assert_eq!(chart.x_range, (0.0, 10.0));

        // Band stays inside [x0 - r0, x0 + r0] = [3, 7].
        assert!(chart.band.first().unwrap().0 >= 3.0 - 1e-12);
        assert!(chart.band.last().unwrap().0 <= 7.0 + 1e-12);

        // Zero baseline stays visible below the data.
        assert!(chart.y_range.0 < 0.0);
        assert!(chart.y_range.1 > 200.0);
    }

    #[test]
    fn degenerate_span_falls_back_to_a_window_around_the_beam() {
        let mut output = run_output();
        output.stats.x_min = 5.0;
        output.stats.x_max = 5.0;

        let chart = BeamChart::new(&output);
        assert_eq!(chart.x_range, (1.0, 9.0));
    }
}
