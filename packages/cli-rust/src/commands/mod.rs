//! CLI command implementations

mod config;
mod generate;
mod templates;

pub use config::{ConfigArgs, cmd_config};
pub use generate::{ExtrasArgs, GenerateArgs, cmd_generate};
pub use templates::cmd_templates;
