//! Config show subcommand
//!
//! Displays the effective configuration in table or JSON format.
//! Uses serde serialization to automatically include all Config fields.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use serde_json::Value;
use vhostgen_core::Config;

/// Show the effective configuration
///
/// Values that differ from the built-in defaults are highlighted, since they
/// change the generated server blocks.
pub fn cmd_config_show(config: &Config, path: &Path, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", config_table(config)?);
    println!();
    let state = if path.exists() {
        ""
    } else {
        " (not present, using defaults)"
    };
    println!("Config file: {}{state}", path.display());
    Ok(())
}

fn config_table(config: &Config) -> Result<Table> {
    let value = serde_json::to_value(config)?;
    let defaults = serde_json::to_value(Config::default())?;
    let obj = value
        .as_object()
        .context("config did not serialize to an object")?;

    let mut table = Table::new();
    table.set_header(vec!["Key", "Value"]);

    for (key, val) in obj {
        let cell = Cell::new(format_value(val));
        let cell = if defaults.get(key) == Some(val) {
            cell
        } else {
            cell.fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new(key), cell]);
    }
    Ok(table)
}

/// Format a JSON value for display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "(not set)".to_string(),
        Value::String(s) if s.is_empty() => "(empty)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
