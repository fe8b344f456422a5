//! vhostgen CLI - Generate nginx virtual-host files
//!
//! This is the main entry point for the Rust CLI binary.

use std::process::ExitCode;

use console::style;

fn main() -> ExitCode {
    match vhostgen::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
