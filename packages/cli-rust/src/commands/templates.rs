//! Templates command implementation
//!
//! Lists the available server-block templates.

use anyhow::Result;
use comfy_table::{Cell, Table};
use vhostgen_core::Template;

/// Run the templates command
pub fn cmd_templates() -> Result<()> {
    println!("{}", templates_table());
    Ok(())
}

fn templates_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Description", "Inputs", "File"]);

    for template in Template::ALL {
        let file = match template {
            Template::HttpsForwarder => "default.conf",
            Template::PortProxy => "<alias>.conf",
            _ => "<server-name>.conf",
        };
        let number = template
            .menu_number()
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        table.add_row(vec![
            Cell::new(number),
            Cell::new(template.slug()),
            Cell::new(template.label()),
            Cell::new(required_inputs(template)),
            Cell::new(file),
        ]);
    }
    table
}

fn required_inputs(template: Template) -> String {
    let mut inputs = Vec::new();
    if template.needs_server_name() {
        inputs.push("--server-name");
    }
    if template.needs_alias() {
        inputs.push("--alias");
    }
    if template.needs_listen_port() {
        inputs.push("--port");
    }
    if template.needs_root_path() {
        inputs.push("--root");
    }
    if template.needs_target_url() {
        inputs.push("--url");
    }
    if inputs.is_empty() {
        return "(none)".to_string();
    }
    inputs.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_inputs_per_template() {
        assert_eq!(
            required_inputs(Template::StaticIndex),
            "--server-name --root"
        );
        assert_eq!(required_inputs(Template::ReverseProxy), "--server-name --url");
        assert_eq!(required_inputs(Template::HttpsForwarder), "(none)");
        assert_eq!(
            required_inputs(Template::PortProxy),
            "--alias --port --url"
        );
    }

    #[test]
    fn table_lists_every_template() {
        let rendered = templates_table().to_string();
        for template in Template::ALL {
            assert!(rendered.contains(template.slug()));
        }
        assert!(rendered.contains("default.conf"));
        assert!(rendered.contains("<alias>.conf"));
    }
}
