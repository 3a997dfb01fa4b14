//! MyLocation CLI - Command-line interface
//!
//! Runs simulated map sessions through the permission-gated locator.

mod cli;
mod commands;
mod config_loader;
mod output;
mod output_types;
mod prompt;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    commands::execute(cli)
}
