//! Command implementations

mod check;
mod config;
mod distance;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;
use mylocation_core::config::CliConfigOverrides;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Distance(args) => distance::execute(args, &output),
        Commands::Check(args) => {
            let overrides = CliConfigOverrides {
                busy_policy: args.busy_policy.map(Into::into),
                alert_on_positioning_error: args.no_error_alert.then_some(false),
                fallback_place_label: None,
            };
            let config = load_config(cli.config.as_deref(), overrides)?;
            check::execute(args, &output, &config)
        }
        Commands::Config => {
            let config = load_config(cli.config.as_deref(), CliConfigOverrides::default())?;
            config::execute(&output, &config)
        }
    }
}
