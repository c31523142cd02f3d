//! lsp-metrics - Workspace metrics logger
//!
//! Counts what a language server would index in a Python workspace, flags
//! imports that look invented, estimates time saved and keeps a rolling log.

mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use lsp_metrics::MetricsError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays parseable
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<MetricsError>() {
                Some(MetricsError::Interrupted) => eprintln!("\n\n{}", err),
                Some(MetricsError::WorkspaceNotFound(_)) => eprintln!("{}", err),
                _ => eprintln!("\nError during analysis: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
