//! vhostgen-core - nginx virtual-host generation
//!
//! Shared library for the vhostgen CLI:
//! - [`vhost`]: the host model and the seven server-block templates
//! - [`writer`]: writing rendered blocks into the nginx include directory
//! - [`config`]: the optional JSONC config file and its validation

pub mod config;
pub mod vhost;
pub mod writer;

pub use config::{Config, ConfigError, load_config_from, load_config_or_default};
pub use vhost::{Extras, RenderSettings, Template, VhostError, VirtualHost, render};
pub use writer::{DEFAULT_OUTPUT_DIR, WriteError, write_vhost};

/// Version of the vhostgen packages
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
