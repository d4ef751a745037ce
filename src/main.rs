// src/main.rs

use anyhow::Result;
use clap::Parser;
use digest_runner::cli::Cli;
use digest_runner::config::ConfigBuilder;
use digest_runner::errors::Error;
#[cfg(feature = "progress")]
use digest_runner::progress::IndicatifProgress;
use digest_runner::progress::ProgressReporter;
use digest_runner::run;
use digest_runner::signal::setup_signal_handler;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    let default_directive = if cfg!(debug_assertions) {
        "digest_runner=debug"
    } else {
        "digest_runner=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_directive.parse()?),
        )
        .init();

    log::info!("Starting digest-runner v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    // --- Setup ---
    let cli = Cli::parse();

    // Show a progress bar only if stderr is a TTY.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    // --- Configuration & Execution ---
    let config = match ConfigBuilder::from_cli(cli).build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("Configuration built successfully.");

    let token = setup_signal_handler()?;

    // --- Error Handling ---
    match run(&config, &token, progress_reporter) {
        Ok(report) if report.is_success() => Ok(()),
        Ok(report) => {
            for outcome in report.failures() {
                eprintln!("Task {} failed: {}", outcome.index + 1, outcome.task);
                if let digest_runner::TaskStatus::Failed(message) = &outcome.status {
                    eprintln!("  {}", message);
                }
            }
            eprintln!(
                "{} of {} task(s) failed.",
                report.failed(),
                report.outcomes.len()
            );
            std::process::exit(1);
        }
        Err(Error::Interrupted) => {
            eprintln!("\nOperation cancelled.");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
