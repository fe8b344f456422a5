//! Summary display
//!
//! Shows the collected answers before the file is written.

use std::path::Path;

use comfy_table::{Cell, Table};
use console::style;
use vhostgen_core::VirtualHost;

/// Build the summary text for a collected host
pub fn render_summary(host: &VirtualHost, target: &Path) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::NOTHING);

    let template = match host.template.menu_number() {
        Some(number) => format!("{} ({number})", host.template.label()),
        None => host.template.label().to_string(),
    };
    table.add_row(vec![Cell::new("Template:"), Cell::new(template)]);
    if let Some(server_name) = &host.server_name {
        table.add_row(vec![Cell::new("Server name:"), Cell::new(server_name)]);
    }
    if let Some(alias) = &host.alias {
        table.add_row(vec![Cell::new("Alias:"), Cell::new(alias)]);
    }
    if let Some(port) = host.listen_port {
        table.add_row(vec![Cell::new("Port:"), Cell::new(port)]);
    }
    if let Some(root) = &host.root_path {
        table.add_row(vec![Cell::new("Root:"), Cell::new(root)]);
    }
    if let Some(url) = &host.target_url {
        table.add_row(vec![Cell::new("Target:"), Cell::new(url)]);
    }

    let extras = extras_summary(host);
    if !extras.is_empty() {
        table.add_row(vec![Cell::new("Extras:"), Cell::new(extras.join(", "))]);
    }
    table.add_row(vec![
        Cell::new("Output:"),
        Cell::new(target.display().to_string()),
    ]);

    format!(
        "{}\n{}\n{table}",
        style("Configuration Summary").bold(),
        style("-".repeat(21)).dim()
    )
}

fn extras_summary(host: &VirtualHost) -> Vec<String> {
    let mut parts = Vec::new();
    if host.extras.hsts {
        parts.push("HSTS".to_string());
    }
    if let Some(age) = &host.extras.cache_max_age {
        parts.push(format!("asset caching ({age})"));
    }
    if host.extras.security {
        parts.push("hardening".to_string());
    }
    parts
}
