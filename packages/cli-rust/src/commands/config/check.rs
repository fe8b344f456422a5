//! Config check subcommand
//!
//! Runs validation and prints every warning, not just errors.

use anyhow::{Result, bail};
use console::style;
use vhostgen_core::Config;
use vhostgen_core::config::{display_validation_error, display_validation_warning, validate_config};

/// Validate the effective configuration
pub fn cmd_config_check(config: &Config, quiet: bool) -> Result<()> {
    let warnings = match validate_config(config) {
        Ok(warnings) => warnings,
        Err(error) => {
            display_validation_error(&error);
            bail!("configuration is invalid");
        }
    };

    for warning in &warnings {
        display_validation_warning(warning);
    }

    if !quiet {
        if warnings.is_empty() {
            println!("{} Configuration is valid", style("Success:").green().bold());
        } else {
            println!(
                "{} Configuration is valid ({} warning{})",
                style("Note:").yellow(),
                warnings.len(),
                if warnings.len() == 1 { "" } else { "s" }
            );
        }
    }
    Ok(())
}
