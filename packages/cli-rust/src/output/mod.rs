//! Output utilities for CLI commands
//!
//! Error formatting shared by the interactive session and the subcommands.

pub mod errors;

pub use errors::format_write_error_anyhow;
