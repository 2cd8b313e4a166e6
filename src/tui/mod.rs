//! Interactive fit viewer.
//!
//! After the run summary is printed, the fitted profile opens full screen so
//! the operator can judge the fit by eye: measured samples, the fitted
//! Gaussian, and the shaded 1/e^2 beam-width band. `q` or `Esc` returns to
//! the shell.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};

use crate::app::pipeline::RunOutput;
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::BeamChart;

/// Show the fitted profile until the operator quits.
pub fn run(output: &RunOutput) -> Result<(), AppError> {
    let chart = BeamChart::new(output);
    let radius_label = format!("1/e^2 beam radius = {:.2}", output.fit.params.r0);

    let _restore = RawScreen::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(render_err("initialize the terminal"))?;

    loop {
        terminal
            .draw(|frame| draw(frame, &chart, &radius_label))
            .map_err(render_err("draw the chart"))?;

        // The chart is static, so there is nothing to animate: block until
        // the next event, then redraw (covers resizes) or quit.
        match event::read().map_err(render_err("read terminal events"))? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

fn draw(frame: &mut Frame<'_>, chart: &BeamChart, radius_label: &str) {
    let [chart_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(frame.area());

    let block = Block::default()
        .title("Beam Profile and Gaussian Fit")
        .borders(Borders::ALL);
    let inner = block.inner(chart_area);
    frame.render_widget(block, chart_area);
    frame.render_widget(chart, inner);

    let footer = Line::from(vec![
        Span::styled(radius_label, Style::default().fg(Color::Cyan)),
        Span::raw("  |  "),
        Span::styled("q / Esc to quit", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(
        Paragraph::new(footer).block(Block::default().borders(Borders::ALL)),
        footer_area,
    );
}

/// RAII guard for raw mode + the alternate screen.
///
/// Restoring in `Drop` keeps the operator's shell usable even when a draw
/// call fails mid-run.
struct RawScreen;

impl RawScreen {
    fn enter() -> Result<Self, AppError> {
        enable_raw_mode().map_err(render_err("enable raw mode"))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::Render(format!(
                "Failed to enter the alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn render_err<E: std::fmt::Display>(what: &'static str) -> impl Fn(E) -> AppError {
    move |e| AppError::Render(format!("Failed to {what}: {e}"))
}
