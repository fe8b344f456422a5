//! Server-block assembly
//!
//! Rendering is a pure function of the host and the settings; nothing on disk
//! is consulted. With default settings and no extras the output matches the
//! golden files under `golden/` byte for byte.

use tracing::warn;

use super::extras::{self, HSTS_LINES, SECURITY_LINES};
use super::{Template, VhostError, VirtualHost};

/// Directory certbot stores issued certificates under
pub const DEFAULT_CERT_DIR: &str = "/etc/certbot/live";

/// php-fpm endpoint used by the PHP template
pub const DEFAULT_PHP_FPM_SOCKET: &str = "unix:/var/run/php/php7.2-fpm.sock";

const TLS_HEADER: &str = "server {\n    listen 443;\n    listen [::]:443;\n    ssl on;\n    access_log off;\n    error_log /dev/null crit;\n";

const HTTPS_FORWARDER: &str = "server {\n    listen 80 default_server;\n    listen [::]:80 default_server;\n    access_log off;\n    error_log /dev/null crit;\n    server_name _;\n    return 301 https://$host$request_uri;\n}\n";

/// Host-specific values interpolated into every template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub cert_dir: String,
    pub php_fpm_socket: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            cert_dir: DEFAULT_CERT_DIR.to_string(),
            php_fpm_socket: DEFAULT_PHP_FPM_SOCKET.to_string(),
        }
    }
}

/// Render a virtual host into nginx server-block text
pub fn render(host: &VirtualHost, settings: &RenderSettings) -> Result<String, VhostError> {
    if host.template == Template::HttpsForwarder {
        if !host.extras.is_empty() {
            warn!("extras are not applied to the HTTP to HTTPS forwarder");
        }
        return Ok(HTTPS_FORWARDER.to_string());
    }

    let mut out = if host.template == Template::PortProxy {
        port_header(host)?
    } else {
        tls_header(host, settings)?
    };

    if host.extras.hsts {
        if host.template.is_tls() {
            out.push_str(HSTS_LINES);
        } else {
            warn!(template = %host.template, "HSTS only applies to TLS server blocks");
        }
    }

    out.push_str(&body(host, settings)?);

    if let Some(max_age) = host.extras.cache_max_age.as_deref() {
        if host.template.needs_root_path() {
            extras::validate_time_value(max_age)?;
            out.push_str(&extras::caching_block(max_age));
        } else {
            warn!(
                template = %host.template,
                "static asset caching only applies to templates that serve files"
            );
        }
    }

    if host.extras.security {
        out.push_str(SECURITY_LINES);
    }

    out.push_str("}\n");
    Ok(out)
}

fn tls_header(host: &VirtualHost, settings: &RenderSettings) -> Result<String, VhostError> {
    let server_name = host.required(host.server_name.as_deref(), "a server name")?;
    let cert_dir = settings.cert_dir.trim_end_matches('/');

    let mut out = String::from(TLS_HEADER);
    out.push_str(&format!(
        "    ssl_certificate {cert_dir}/{server_name}/fullchain.pem;\n    ssl_certificate_key {cert_dir}/{server_name}/privkey.pem;\n    server_name {server_name};\n"
    ));
    Ok(out)
}

/// Plain HTTP listener on the requested port, answering for any host
fn port_header(host: &VirtualHost) -> Result<String, VhostError> {
    let port = host.listen_port.ok_or(VhostError::MissingField {
        template: host.template,
        field: "a listening port",
    })?;
    if port == 0 {
        return Err(VhostError::InvalidPort);
    }
    Ok(format!(
        "server {{\n    listen {port};\n    listen [::]:{port};\n    access_log off;\n    error_log /dev/null crit;\n    server_name _;\n"
    ))
}

fn body(host: &VirtualHost, settings: &RenderSettings) -> Result<String, VhostError> {
    let root = || host.required(host.root_path.as_deref(), "a root path");
    let url = || host.required(host.target_url.as_deref(), "a target URL");

    let text = match host.template {
        Template::StaticIndex => format!(
            "    location / {{\n        root {};\n        index index.html;\n    }}\n",
            root()?
        ),
        Template::StaticFiles => format!("    location / {{\n        root {};\n    }}\n", root()?),
        Template::SinglePageApp => format!(
            "    root {};\n    index index.html;\n    location / {{\n        try_files $uri $uri/ @rewrites;\n    }}\n    location @rewrites {{\n        rewrite ^(.+)$ /index.html last;\n    }}\n",
            root()?
        ),
        Template::ReverseProxy | Template::PortProxy => format!(
            "    location / {{\n        proxy_pass {};\n        proxy_read_timeout  90;\n    }}\n",
            url()?
        ),
        Template::PhpFastcgi => format!(
            "    root {};\n    index index.php;\n    location / {{\n        try_files $uri $uri/ =404;\n        autoindex  on;\n        autoindex_exact_size off;\n        autoindex_localtime on;\n    }}\n    location ~* \\.php$ {{\n        include snippets/fastcgi-php.conf;\n        fastcgi_pass  {};\n    }}\n",
            root()?,
            settings.php_fpm_socket
        ),
        Template::Redirect => format!("    return 301 {};\n", url()?),
        Template::HttpsForwarder => String::new(),
    };
    Ok(text)
}
