//! Interactive session
//!
//! Shows the menu, asks only for the inputs the chosen template uses, renders
//! the server block in memory, then writes it in one go. Nothing here exits
//! the process: the result is a [`SessionOutcome`] for `main` to act on.

pub mod menu;
mod summary;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use tracing::info;
use vhostgen_core::vhost::validate_time_value;
use vhostgen_core::{Extras, RenderSettings, Template, VirtualHost, render, write_vhost};

use crate::output::format_write_error_anyhow;
use crate::prompt::{Prompt, PromptError};
use menu::{MenuSelection, ask_menu_choice};

pub use summary::render_summary;

const SERVER_NAME_PROMPT: &str =
    "Enter the domain/subdomain name(s) (separated by space and without the ending semicolon)";
const ROOT_PATH_PROMPT: &str = "Enter the path where the files are (root path for virtual server)";
const PROXY_URL_PROMPT: &str =
    "Enter the resource to proxy (e.g. http://127.0.0.1:8000 or http://example.com)";
const REDIRECT_URL_PROMPT: &str = "Enter the resource to redirect all requests to (e.g. https://example.com$request_uri); $request_uri is NOT appended automatically";

/// Everything the session needs besides the operator's answers
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub output_dir: PathBuf,
    pub render: RenderSettings,
    pub extras: Extras,
    /// Print the block instead of writing it
    pub dry_run: bool,
}

impl SessionSettings {
    /// Reject flag values that would only fail after every question is answered
    pub fn validate(&self) -> Result<()> {
        if let Some(age) = self.extras.cache_max_age.as_deref() {
            validate_time_value(age)?;
        }
        Ok(())
    }
}

/// How an interactive session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Written(PathBuf),
    Printed,
    Exited,
    InvalidChoice(i64),
}

impl SessionOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionOutcome::InvalidChoice(_) => 1,
            _ => 0,
        }
    }
}

/// Result of the question-and-answer part of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collected {
    Host(VirtualHost),
    Exit,
    InvalidChoice(i64),
}

/// Ask for a template and the inputs it needs
///
/// Root path is asked only for templates that serve files, the URL only for
/// proxy and redirect.
pub fn collect_host<P: Prompt>(
    prompter: &mut P,
    extras: &Extras,
) -> Result<Collected, PromptError> {
    let template = match ask_menu_choice(prompter)? {
        MenuSelection::Template(template) => template,
        MenuSelection::Exit => return Ok(Collected::Exit),
        MenuSelection::OutOfRange(number) => return Ok(Collected::InvalidChoice(number)),
    };

    let mut host = VirtualHost::new(template).with_extras(extras.clone());

    if template.needs_server_name() {
        host.server_name = Some(prompter.ask_required(SERVER_NAME_PROMPT)?);
    }
    if template.needs_root_path() {
        host.root_path = Some(prompter.ask_required(ROOT_PATH_PROMPT)?);
    }
    if template.needs_target_url() {
        let prompt = if template == Template::Redirect {
            REDIRECT_URL_PROMPT
        } else {
            PROXY_URL_PROMPT
        };
        host.target_url = Some(prompter.ask_required(prompt)?);
    }

    Ok(Collected::Host(host))
}

/// Run one full interactive session
pub fn run_session<P: Prompt>(
    prompter: &mut P,
    settings: &SessionSettings,
) -> Result<SessionOutcome> {
    settings.validate()?;

    let host = match collect_host(prompter, &settings.extras).context("Setup cancelled")? {
        Collected::Host(host) => host,
        Collected::Exit => return Ok(SessionOutcome::Exited),
        Collected::InvalidChoice(number) => {
            prompter.say(format!(
                "{} {number} is not a menu option (expected 1-8).",
                style("Error:").red().bold()
            ))?;
            return Ok(SessionOutcome::InvalidChoice(number));
        }
    };

    // Assemble fully before touching the filesystem.
    let contents = render(&host, &settings.render)?;
    let file_name = host.file_name()?;

    if settings.dry_run {
        prompter.say("")?;
        prompter.say(contents.trim_end_matches('\n'))?;
        return Ok(SessionOutcome::Printed);
    }

    let target = settings.output_dir.join(&file_name);
    prompter.say("")?;
    prompter.say(render_summary(&host, &target))?;
    prompter.say("")?;

    let path = write_vhost(&settings.output_dir, &file_name, &contents)
        .map_err(|e| format_write_error_anyhow(&e))?;
    info!(template = %host.template, path = %path.display(), "session complete");

    print_written(prompter, &path)?;
    Ok(SessionOutcome::Written(path))
}

fn print_written<P: Prompt>(
    prompter: &mut P,
    path: &Path,
) -> Result<(), PromptError> {
    prompter.say(format!(
        "{} Config written to {}",
        style("Success:").green().bold(),
        style(path.display()).cyan()
    ))?;
    prompter.say(style("Check it with `nginx -t`, then reload nginx to apply.").dim())
}
