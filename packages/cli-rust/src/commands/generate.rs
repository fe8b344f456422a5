//! Generate command implementation
//!
//! Renders a server block from flags, without any prompts.

use std::path::Path;

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use console::style;
use tracing::warn;
use vhostgen_core::{Extras, RenderSettings, Template, VirtualHost, render, write_vhost};

use crate::output::format_write_error_anyhow;

/// Template names accepted by `--template`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TemplateArg {
    /// Static site with index.html (menu 1)
    Static,
    /// File host without an index directive (menu 2)
    Files,
    /// Single-page app with client-side routing (menu 3)
    Spa,
    /// Reverse proxy (menu 4)
    Proxy,
    /// PHP through php-fpm (menu 5)
    Php,
    /// Permanent redirect (menu 6)
    Redirect,
    /// Port 80 catch-all forwarding to HTTPS (menu 7)
    HttpsRedirect,
    /// Hostless proxy on a custom port (flags only)
    PortProxy,
}

impl From<TemplateArg> for Template {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Static => Template::StaticIndex,
            TemplateArg::Files => Template::StaticFiles,
            TemplateArg::Spa => Template::SinglePageApp,
            TemplateArg::Proxy => Template::ReverseProxy,
            TemplateArg::Php => Template::PhpFastcgi,
            TemplateArg::Redirect => Template::Redirect,
            TemplateArg::HttpsRedirect => Template::HttpsForwarder,
            TemplateArg::PortProxy => Template::PortProxy,
        }
    }
}

/// Optional directive blocks, shared by the interactive and flag-driven modes
#[derive(Args, Clone, Debug, Default)]
pub struct ExtrasArgs {
    /// Send a Strict-Transport-Security header
    #[arg(long)]
    pub hsts: bool,

    /// Append server_tokens, buffer-size, timeout and header hardening
    #[arg(long)]
    pub harden: bool,

    /// Cache static assets; optional max-age such as 30m, 6h, 1d
    #[arg(
        long,
        value_name = "MAX_AGE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = ""
    )]
    pub cache: Option<String>,
}

impl ExtrasArgs {
    /// Build extras, taking the cache max-age from config when none was given
    pub fn to_extras(&self, default_max_age: &str) -> Extras {
        let extras = Extras {
            hsts: self.hsts,
            security: self.harden,
            cache_max_age: None,
        };
        match self.cache.as_deref() {
            Some(age) if !age.trim().is_empty() => extras.with_cache(Some(age)),
            Some(_) => extras.with_cache(Some(default_max_age)),
            None => extras,
        }
    }
}

/// Arguments for the generate command
#[derive(Args)]
pub struct GenerateArgs {
    /// Which server block to produce
    #[arg(long, short, value_enum)]
    pub template: TemplateArg,

    /// Domain name(s), space separated
    #[arg(long, short = 'n')]
    pub server_name: Option<String>,

    /// Document root (static, files, spa, php)
    #[arg(long, short)]
    pub root: Option<String>,

    /// Upstream or redirect target (proxy, redirect, port-proxy)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Port to listen on (port-proxy)
    #[arg(long, short, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Name of the written file, without `.conf` (port-proxy)
    #[arg(long, short)]
    pub alias: Option<String>,

    #[command(flatten)]
    pub extras: ExtrasArgs,

    /// Print the server block instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

/// Build the host described by the flags, rejecting missing inputs
pub fn host_from_args(args: &GenerateArgs, default_max_age: &str) -> Result<VirtualHost> {
    let template = Template::from(args.template);
    let extras = args.extras.to_extras(default_max_age);
    let mut host = VirtualHost::new(template).with_extras(extras);

    host.server_name = pick(
        template.needs_server_name(),
        &args.server_name,
        "--server-name",
        template,
    )?;
    host.root_path = pick(template.needs_root_path(), &args.root, "--root", template)?;
    host.target_url = pick(template.needs_target_url(), &args.url, "--url", template)?;
    host.alias = pick(template.needs_alias(), &args.alias, "--alias", template)?;
    host.listen_port = match (template.needs_listen_port(), args.port) {
        (true, Some(port)) => Some(port),
        (true, None) => bail!("--port is required for the '{template}' template"),
        (false, Some(_)) => {
            warn!(
                flag = "--port",
                template = %template,
                "flag is not used by this template, ignoring"
            );
            None
        }
        (false, None) => None,
    };

    Ok(host)
}

fn pick(
    needed: bool,
    value: &Option<String>,
    flag: &str,
    template: Template,
) -> Result<Option<String>> {
    let value = value.as_deref().map(str::trim).filter(|v| !v.is_empty());
    match (needed, value) {
        (true, Some(v)) => Ok(Some(v.to_string())),
        (true, None) => bail!("{flag} is required for the '{template}' template"),
        (false, Some(_)) => {
            warn!(flag, template = %template, "flag is not used by this template, ignoring");
            Ok(None)
        }
        (false, None) => Ok(None),
    }
}

/// Run the generate command
pub fn cmd_generate(
    args: &GenerateArgs,
    output_dir: &Path,
    settings: &RenderSettings,
    default_max_age: &str,
    quiet: bool,
) -> Result<()> {
    let host = host_from_args(args, default_max_age)?;
    let contents = render(&host, settings)?;

    if args.stdout {
        print!("{contents}");
        return Ok(());
    }

    let path = write_vhost(output_dir, &host.file_name()?, &contents)
        .map_err(|e| format_write_error_anyhow(&e))?;

    if !quiet {
        println!(
            "{} Config written to {}",
            style("Success:").green().bold(),
            style(path.display()).cyan()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn parse(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["generate"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).args
    }

    #[test]
    fn template_names_map_to_menu_order() {
        let numbers: Vec<Option<u8>> = TemplateArg::value_variants()
            .iter()
            .map(|arg| Template::from(*arg).menu_number())
            .collect();
        let mut expected: Vec<Option<u8>> = (1..=7).map(Some).collect();
        expected.push(None);
        assert_eq!(numbers, expected);
    }

    #[test]
    fn https_redirect_name_is_kebab_case() {
        let args = parse(&["--template", "https-redirect"]);
        assert_eq!(args.template, TemplateArg::HttpsRedirect);
    }

    #[test]
    fn proxy_requires_url() {
        let args = parse(&["-t", "proxy", "--server-name", "a.com"]);
        let err = host_from_args(&args, "6h").unwrap_err();
        assert!(err.to_string().contains("--url is required"));
    }

    #[test]
    fn static_requires_server_name() {
        let args = parse(&["-t", "static", "--root", "/srv"]);
        let err = host_from_args(&args, "6h").unwrap_err();
        assert!(err.to_string().contains("--server-name is required"));
    }

    #[test]
    fn unused_flags_are_dropped() {
        let args = parse(&["-t", "redirect", "-n", "a.com", "-u", "https://b.com", "-r", "/srv"]);
        let host = host_from_args(&args, "6h").unwrap();
        assert_eq!(host.root_path, None);
        assert_eq!(host.target_url.as_deref(), Some("https://b.com"));
    }

    #[test]
    fn bare_cache_flag_uses_configured_age() {
        let args = parse(&["-t", "files", "-n", "a.com", "-r", "/srv", "--cache"]);
        let host = host_from_args(&args, "12h").unwrap();
        assert_eq!(host.extras.cache_max_age.as_deref(), Some("12h"));
    }

    #[test]
    fn cache_flag_with_value() {
        let args = parse(&["-t", "files", "-n", "a.com", "-r", "/srv", "--cache=1d", "--hsts"]);
        let host = host_from_args(&args, "6h").unwrap();
        assert_eq!(host.extras.cache_max_age.as_deref(), Some("1d"));
        assert!(host.extras.hsts);
        assert!(!host.extras.security);
    }

    #[test]
    fn generate_writes_file() {
        let tmp = TempDir::new().unwrap();
        let args = parse(&["-t", "proxy", "-n", "a.com", "-u", "http://127.0.0.1:8000"]);
        cmd_generate(&args, tmp.path(), &RenderSettings::default(), "6h", true).unwrap();

        let text = fs::read_to_string(tmp.path().join("a.com.conf")).unwrap();
        assert!(text.contains("proxy_pass http://127.0.0.1:8000;"));
    }

    #[test]
    fn port_proxy_requires_port_and_alias() {
        let args = parse(&["-t", "port-proxy", "-u", "http://127.0.0.1:5000", "-a", "metrics"]);
        let err = host_from_args(&args, "6h").unwrap_err();
        assert!(err.to_string().contains("--port is required"));

        let args = parse(&["-t", "port-proxy", "-u", "http://127.0.0.1:5000", "-p", "4321"]);
        let err = host_from_args(&args, "6h").unwrap_err();
        assert!(err.to_string().contains("--alias is required"));
    }

    #[test]
    fn port_zero_is_rejected_by_the_parser() {
        let result = TestCli::try_parse_from([
            "generate", "-t", "port-proxy", "-p", "0", "-a", "m", "-u", "http://x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn generate_port_proxy_writes_alias_file() {
        let tmp = TempDir::new().unwrap();
        let args = parse(&[
            "-t",
            "port-proxy",
            "--port",
            "4321",
            "--alias",
            "metrics",
            "--url",
            "http://127.0.0.1:5000",
            "--server-name",
            "ignored.com",
        ]);
        cmd_generate(&args, tmp.path(), &RenderSettings::default(), "6h", true).unwrap();

        let text = fs::read_to_string(tmp.path().join("metrics.conf")).unwrap();
        assert!(text.starts_with("server {\n    listen 4321;\n    listen [::]:4321;\n"));
        assert!(text.contains("    server_name _;\n"));
        assert!(text.contains("proxy_pass http://127.0.0.1:5000;"));
        assert!(!tmp.path().join("ignored.com.conf").exists());
    }

    #[test]
    fn generate_forwarder_ignores_server_name() {
        let tmp = TempDir::new().unwrap();
        let args = parse(&["-t", "https-redirect", "-n", "a.com"]);
        cmd_generate(&args, tmp.path(), &RenderSettings::default(), "6h", true).unwrap();

        assert!(tmp.path().join("default.conf").exists());
        assert!(!tmp.path().join("a.com.conf").exists());
    }
}
