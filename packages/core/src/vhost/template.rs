//! The fixed set of server-block templates
//!
//! Menu templates map to one menu number each; every template declares which
//! inputs it needs.

use std::fmt;

/// File name used by the HTTP to HTTPS forwarder, whatever domain was entered
pub const DEFAULT_SERVER_FILE: &str = "default.conf";

/// One of the server-block layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// Static site served with `index index.html`
    StaticIndex,
    /// Plain file host without an index directive
    StaticFiles,
    /// Client-routed app, unknown paths rewritten to `/index.html`
    SinglePageApp,
    /// `proxy_pass` to an upstream URL
    ReverseProxy,
    /// PHP through fastcgi and php-fpm
    PhpFastcgi,
    /// Permanent redirect to another URL
    Redirect,
    /// Port 80 catch-all that forwards to HTTPS
    HttpsForwarder,
    /// Hostless `proxy_pass` on a custom port, written to `<alias>.conf`
    PortProxy,
}

impl Template {
    /// Templates offered by the interactive menu, in menu order
    pub const MENU: [Template; 7] = [
        Template::StaticIndex,
        Template::StaticFiles,
        Template::SinglePageApp,
        Template::ReverseProxy,
        Template::PhpFastcgi,
        Template::Redirect,
        Template::HttpsForwarder,
    ];

    pub const ALL: [Template; 8] = [
        Template::StaticIndex,
        Template::StaticFiles,
        Template::SinglePageApp,
        Template::ReverseProxy,
        Template::PhpFastcgi,
        Template::Redirect,
        Template::HttpsForwarder,
        Template::PortProxy,
    ];

    /// Look up a template by its menu number (1-7)
    pub fn from_menu_number(number: i64) -> Option<Self> {
        Self::MENU
            .iter()
            .copied()
            .find(|template| template.menu_number().map(i64::from) == Some(number))
    }

    /// Menu position, or `None` for templates only reachable through flags
    pub fn menu_number(&self) -> Option<u8> {
        match self {
            Template::StaticIndex => Some(1),
            Template::StaticFiles => Some(2),
            Template::SinglePageApp => Some(3),
            Template::ReverseProxy => Some(4),
            Template::PhpFastcgi => Some(5),
            Template::Redirect => Some(6),
            Template::HttpsForwarder => Some(7),
            Template::PortProxy => None,
        }
    }

    /// Menu line shown to the operator
    pub fn label(&self) -> &'static str {
        match self {
            Template::StaticIndex => "Create static site config (with index)",
            Template::StaticFiles => "Create config to host files (w/o index)",
            Template::SinglePageApp => "Create config for a single-page app with client-side routing",
            Template::ReverseProxy => "Proxy pass requests to a port or a site",
            Template::PhpFastcgi => "Serve a PHP site with fastcgi and php-fpm",
            Template::Redirect => "Permanent URL redirection to someplace else",
            Template::HttpsForwarder => "Configure to forward all HTTP requests to HTTPS",
            Template::PortProxy => "Port forward without hostname on a custom port",
        }
    }

    /// Short machine name, used by the non-interactive CLI
    pub fn slug(&self) -> &'static str {
        match self {
            Template::StaticIndex => "static",
            Template::StaticFiles => "files",
            Template::SinglePageApp => "spa",
            Template::ReverseProxy => "proxy",
            Template::PhpFastcgi => "php",
            Template::Redirect => "redirect",
            Template::HttpsForwarder => "https-redirect",
            Template::PortProxy => "port-proxy",
        }
    }

    pub fn needs_server_name(&self) -> bool {
        !matches!(self, Template::HttpsForwarder | Template::PortProxy)
    }

    /// File-name alias, used by the hostless port proxy
    pub fn needs_alias(&self) -> bool {
        matches!(self, Template::PortProxy)
    }

    pub fn needs_listen_port(&self) -> bool {
        matches!(self, Template::PortProxy)
    }

    pub fn needs_root_path(&self) -> bool {
        matches!(
            self,
            Template::StaticIndex
                | Template::StaticFiles
                | Template::SinglePageApp
                | Template::PhpFastcgi
        )
    }

    pub fn needs_target_url(&self) -> bool {
        matches!(
            self,
            Template::ReverseProxy | Template::Redirect | Template::PortProxy
        )
    }

    /// Whether the block terminates TLS and carries certificate lines
    pub fn is_tls(&self) -> bool {
        !matches!(self, Template::HttpsForwarder | Template::PortProxy)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
