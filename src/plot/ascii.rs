//! Deterministic ASCII chart for non-interactive output.
//!
//! When stdout is piped (scripts, CI) the interactive viewer is useless, so
//! the chart degrades to a fixed-size character grid. Marks:
//!
//! - `o` measured sample
//! - `-` fitted curve
//! - `.` shaded 1/e^2 beam-width region under the curve

use crate::domain::{GaussianParams, Sample};
use crate::model;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 25;

/// Render the profile, the fitted curve, and the shaded 1/e^2 band.
pub fn render_ascii_plot(
    samples: &[Sample],
    params: &GaussianParams,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_lo, x_hi) = position_range(samples)
        .unwrap_or((params.x0 - 2.0 * params.r0, params.x0 + 2.0 * params.r0));

    // One curve sample per column; the render grid IS the fixed-step grid.
    let curve = model::sample_curve(params, x_lo, x_hi, width);

    let (y_lo, y_hi) = intensity_range(samples, &curve).unwrap_or((0.0, 1.0));
    // Margin so extremes don't sit exactly on the grid edge.
    let margin = ((y_hi - y_lo) * 0.05).max(1e-12);
    let (y_lo, y_hi) = (y_lo - margin, y_hi + margin);

    let mut canvas = Canvas::new(width, height, (x_lo, x_hi), (y_lo, y_hi));
    canvas.trace_curve(&curve);
    canvas.shade_band(params, &curve);
    for s in samples {
        canvas.mark(s.position, s.intensity, 'o');
    }

    let mut out = format!(
        "Plot: x=[{x_lo:.3}, {x_hi:.3}] | intensity=[{y_lo:.2}, {y_hi:.2}]\n"
    );
    out.push_str(&canvas.into_rows());
    out.push_str(&format!(
        "Shaded: 1/e^2 beam width [{:.3}, {:.3}] | radius {:.2}\n",
        params.x0 - params.r0,
        params.x0 + params.r0,
        params.r0
    ));
    out
}

fn position_range(samples: &[Sample]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for s in samples {
        lo = lo.min(s.position);
        hi = hi.max(s.position);
    }
    (lo.is_finite() && hi > lo).then_some((lo, hi))
}

fn intensity_range(samples: &[Sample], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for y in samples
        .iter()
        .map(|s| s.intensity)
        .chain(curve.iter().map(|&(_, y)| y))
    {
        lo = lo.min(y);
        hi = hi.max(y);
    }
    (lo.is_finite() && hi > lo).then_some((lo, hi))
}

/// Fixed-size character grid with data-space addressing.
struct Canvas {
    rows: Vec<Vec<char>>,
    width: usize,
    height: usize,
    x: (f64, f64),
    y: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            rows: vec![vec![' '; width]; height],
            width,
            height,
            x,
            y,
        }
    }

    /// Column index for a position (clamped to the grid).
    fn col(&self, x: f64) -> usize {
        let u = ((x - self.x.0) / (self.x.1 - self.x.0)).clamp(0.0, 1.0);
        (u * (self.width - 1) as f64).round() as usize
    }

    /// Row index for an intensity; row 0 is the top of the grid.
    fn row(&self, y: f64) -> usize {
        let u = ((y - self.y.0) / (self.y.1 - self.y.0)).clamp(0.0, 1.0);
        ((1.0 - u) * (self.height - 1) as f64).round() as usize
    }

    /// Draw the curve with one mark per column, joining adjacent columns
    /// with a vertical run so steep flanks stay connected.
    fn trace_curve(&mut self, curve: &[(f64, f64)]) {
        let mut prev_row: Option<usize> = None;
        for (col, &(_, y)) in curve.iter().enumerate() {
            let row = self.row(y);
            let (top, bottom) = match prev_row {
                Some(p) => (row.min(p), row.max(p)),
                None => (row, row),
            };
            for r in top..=bottom {
                if self.rows[r][col] == ' ' {
                    self.rows[r][col] = '-';
                }
            }
            prev_row = Some(row);
        }
    }

    /// Shade columns inside `[x0 - r0, x0 + r0]` from the curve down to the
    /// zero line (blank cells only, so the curve stays visible).
    fn shade_band(&mut self, params: &GaussianParams, curve: &[(f64, f64)]) {
        let lo = params.x0 - params.r0;
        let hi = params.x0 + params.r0;
        let base = self.row(0.0);

        for (col, &(x, y)) in curve.iter().enumerate() {
            if x < lo || x > hi {
                continue;
            }
            for r in self.row(y)..=base {
                if self.rows[r][col] == ' ' {
                    self.rows[r][col] = '.';
                }
            }
        }
    }

    /// Place a data-point mark, overwriting whatever is underneath.
    fn mark(&mut self, x: f64, y: f64, ch: char) {
        let col = self.col(x);
        let row = self.row(y);
        self.rows[row][col] = ch;
    }

    fn into_rows(self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
