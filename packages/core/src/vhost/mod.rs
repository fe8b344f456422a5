//! nginx virtual-host model and server-block assembly
//!
//! A [`VirtualHost`] holds the operator's answers; [`render`] turns it into
//! the text of one server block.

mod error;
mod extras;
mod render;
mod template;

pub use error::VhostError;
pub use extras::{DEFAULT_CACHE_MAX_AGE, Extras, validate_time_value};
pub use render::{DEFAULT_CERT_DIR, DEFAULT_PHP_FPM_SOCKET, RenderSettings, render};
pub use template::{DEFAULT_SERVER_FILE, Template};

/// Answers collected for one virtual host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualHost {
    pub template: Template,
    /// One or more space-separated domains, used verbatim
    pub server_name: Option<String>,
    pub root_path: Option<String>,
    pub target_url: Option<String>,
    /// File-name alias for the port proxy
    pub alias: Option<String>,
    pub listen_port: Option<u16>,
    pub extras: Extras,
}

impl VirtualHost {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            server_name: None,
            root_path: None,
            target_url: None,
            alias: None,
            listen_port: None,
            extras: Extras::default(),
        }
    }

    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = Some(root_path.into());
        self
    }

    pub fn with_target_url(mut self, target_url: impl Into<String>) -> Self {
        self.target_url = Some(target_url.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_listen_port(mut self, port: u16) -> Self {
        self.listen_port = Some(port);
        self
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = extras;
        self
    }

    /// Name of the file this host is written to
    ///
    /// The forwarder always lands in `default.conf` and the port proxy in
    /// `<alias>.conf`; everything else uses the server name as entered.
    pub fn file_name(&self) -> Result<String, VhostError> {
        let stem = match self.template {
            Template::HttpsForwarder => return Ok(DEFAULT_SERVER_FILE.to_string()),
            Template::PortProxy => self.required(self.alias.as_deref(), "an alias")?,
            _ => self.required(self.server_name.as_deref(), "a server name")?,
        };
        Ok(format!("{stem}.conf"))
    }

    pub(crate) fn required<'a>(
        &self,
        value: Option<&'a str>,
        field: &'static str,
    ) -> Result<&'a str, VhostError> {
        value.ok_or(VhostError::MissingField {
            template: self.template,
            field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_server_name_verbatim() {
        let host = VirtualHost::new(Template::StaticIndex).with_server_name("example.com");
        assert_eq!(host.file_name().unwrap(), "example.com.conf");

        let host = VirtualHost::new(Template::Redirect).with_server_name("a.com www.a.com");
        assert_eq!(host.file_name().unwrap(), "a.com www.a.com.conf");
    }

    #[test]
    fn forwarder_always_writes_default_conf() {
        let host = VirtualHost::new(Template::HttpsForwarder).with_server_name("ignored.com");
        assert_eq!(host.file_name().unwrap(), "default.conf");
    }

    #[test]
    fn port_proxy_is_named_after_its_alias() {
        let host = VirtualHost::new(Template::PortProxy)
            .with_alias("metrics")
            .with_listen_port(4321);
        assert_eq!(host.file_name().unwrap(), "metrics.conf");

        let unnamed = VirtualHost::new(Template::PortProxy).with_server_name("a.com");
        assert_eq!(
            unnamed.file_name(),
            Err(VhostError::MissingField {
                template: Template::PortProxy,
                field: "an alias",
            })
        );
    }

    #[test]
    fn file_name_requires_server_name() {
        let host = VirtualHost::new(Template::ReverseProxy);
        assert_eq!(
            host.file_name(),
            Err(VhostError::MissingField {
                template: Template::ReverseProxy,
                field: "a server name",
            })
        );
    }
}
