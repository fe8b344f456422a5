//! Errors raised while assembling a server block

use thiserror::Error;

use super::Template;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VhostError {
    /// A field the template interpolates was not provided
    #[error("template '{template}' requires {field}")]
    MissingField {
        template: Template,
        field: &'static str,
    },

    /// Cache max-age is not a valid nginx time value
    #[error("invalid cache max-age '{0}' (expected e.g. 30m, 6h, 1d)")]
    InvalidCacheAge(String),

    /// Port 0 cannot be listened on
    #[error("listening port must be between 1 and 65535")]
    InvalidPort,
}
