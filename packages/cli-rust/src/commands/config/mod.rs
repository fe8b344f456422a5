//! Config subcommand implementations
//!
//! Provides `vhostgen config` subcommands for inspecting configuration.

mod check;
mod show;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use vhostgen_core::Config;

pub use check::cmd_config_check;
pub use show::cmd_config_show;

/// Configuration command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Output as JSON instead of table format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

/// Configuration inspection subcommands
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the effective configuration
    Show {
        /// Output as JSON instead of table format
        #[arg(long)]
        json: bool,
    },
    /// Print the config file path
    Path,
    /// Validate the configuration and list warnings
    Check,
}

/// Handle config command
///
/// Routes to the appropriate handler based on the subcommand.
/// If no subcommand is given, defaults to Show.
pub fn cmd_config(args: ConfigArgs, config: &Config, path: &Path, quiet: bool) -> Result<()> {
    match args.command {
        Some(ConfigSubcommands::Show { json }) => cmd_config_show(config, path, json),
        Some(ConfigSubcommands::Path) => {
            println!("{}", path.display());
            Ok(())
        }
        Some(ConfigSubcommands::Check) => cmd_config_check(config, quiet),
        None => cmd_config_show(config, path, args.json),
    }
}
