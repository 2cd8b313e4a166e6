//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment configuration
//! - runs the load -> filter -> fit pipeline
//! - prints the run summary (including the radius line)
//! - renders the chart (interactive on a terminal, ASCII otherwise)

use clap::Parser;
use crossterm::tty::IsTty;

use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `beamr` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    let config = crate::cli::analysis_config(&cli)?;

    let output = pipeline::run_analysis(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            &config,
            &output.ingest,
            output.removed,
            &output.stats,
            &output.fit,
        )
    );

    // On a terminal, open the interactive chart for visual verification.
    // When piped (scripts, CI), stay deterministic and print the ASCII chart.
    if std::io::stdout().is_tty() {
        crate::tui::run(&output)
    } else {
        let plot = crate::plot::render_ascii_plot(
            &output.samples,
            &output.fit.params,
            crate::plot::DEFAULT_WIDTH,
            crate::plot::DEFAULT_HEIGHT,
        );
        println!("{plot}");
        Ok(())
    }
}
