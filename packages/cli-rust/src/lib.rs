//! vhostgen CLI - Generate nginx virtual-host files
//!
//! This module contains the shared CLI implementation used by the binary.

mod commands;
mod output;
mod prompt;
pub mod wizard;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vhostgen_core::config::paths::{CONFIG_PATH_ENV, resolve_config_path};
use vhostgen_core::config::{display_validation_warning, validate_config};
use vhostgen_core::{Config, get_version, load_config_from};

pub use prompt::{Prompt, PromptError, Prompter, TermPrompter};

/// Generate nginx virtual-host files
#[derive(Parser)]
#[command(name = "vhostgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate nginx virtual-host files", long_about = None)]
#[command(after_help = get_banner())]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    session: SessionArgs,

    /// Increase verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory to write server blocks into (overrides output_dir)
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

/// Options for the interactive session
#[derive(Args, Clone, Default)]
struct SessionArgs {
    #[command(flatten)]
    extras: commands::ExtrasArgs,

    /// Print the generated block instead of writing it
    #[arg(long)]
    dry_run: bool,
}

impl SessionArgs {
    fn is_set(&self) -> bool {
        self.dry_run || self.extras.hsts || self.extras.harden || self.extras.cache.is_some()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive session (the default)
    New(SessionArgs),
    /// Render a server block without prompting
    Generate(commands::GenerateArgs),
    /// List the available templates
    Templates,
    /// Inspect configuration
    Config(commands::ConfigArgs),
}

/// Get the ASCII banner for help display
fn get_banner() -> &'static str {
    r#"
       _               _
__   _| |__   ___  ___| |_ __ _  ___ _ __
\ \ / / '_ \ / _ \/ __| __/ _` |/ _ \ '_ \
 \ V /| | | | (_) \__ \ || (_| |  __/ | | |
  \_/ |_| |_|\___/|___/\__\__, |\___|_| |_|
                          |___/   nginx
"#
}

/// Filter directive for the given verbosity flags
fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Initialize tracing to stderr; `RUST_LOG` wins over the flags
fn init_tracing(verbose: u8, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Configure color output
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    init_tracing(cli.verbose, cli.quiet);
    debug!(version = get_version(), "vhostgen starting");
    reject_misplaced_session_flags(&cli)?;

    let from_env = std::env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty());
    let config_path =
        resolve_config_path(cli.config.as_deref(), from_env.as_deref().map(Path::new))
            .context("Could not determine the config file location; pass --config")?;

    let config = match load_config_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            // Display rich error for invalid config
            eprintln!("{} Configuration error", style("Error:").red().bold());
            eprintln!();
            eprintln!("  {e}");
            eprintln!();
            eprintln!("  Config file: {}", style(config_path.display()).yellow());
            eprintln!();
            eprintln!(
                "  {} Check the config file for syntax errors or unknown fields.",
                style("Tip:").cyan()
            );
            eprintln!(
                "  {} Remove the file to fall back to built-in defaults.",
                style("Tip:").cyan()
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.verbose > 0 {
        eprintln!(
            "{} Config: {}",
            style("[info]").cyan(),
            config_path.display()
        );
    }

    // `config check` reports validation itself
    if !matches!(cli.command, Some(Commands::Config(_))) {
        check_config(&config, cli.verbose)?;
    }

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));
    info!(output_dir = %output_dir.display(), "output directory resolved");

    match cli.command {
        Some(Commands::New(session)) => {
            run_interactive(&session, &config, output_dir, cli.quiet)
        }
        None => run_interactive(&cli.session, &config, output_dir, cli.quiet),
        Some(Commands::Generate(args)) => {
            commands::cmd_generate(
                &args,
                &output_dir,
                &config.render_settings(),
                &config.cache_max_age,
                cli.quiet,
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Templates) => {
            commands::cmd_templates()?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config(args)) => {
            commands::cmd_config(args, &config, &config_path, cli.quiet)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Session flags given before a subcommand would otherwise be dropped
fn reject_misplaced_session_flags(cli: &Cli) -> Result<()> {
    if cli.command.is_some() && cli.session.is_set() {
        bail!(
            "--hsts, --harden, --cache and --dry-run must follow the subcommand they apply to \
             (e.g. `vhostgen generate -t static --hsts ...`)"
        );
    }
    Ok(())
}

/// Fail on invalid config, show warnings only when verbose
fn check_config(config: &Config, verbose: u8) -> Result<()> {
    match validate_config(config) {
        Ok(warnings) => {
            if verbose > 0 {
                for warning in &warnings {
                    display_validation_warning(warning);
                }
            }
            Ok(())
        }
        Err(error) => {
            vhostgen_core::config::display_validation_error(&error);
            Err(anyhow::anyhow!("invalid configuration: {}", error.message))
        }
    }
}

fn run_interactive(
    args: &SessionArgs,
    config: &Config,
    output_dir: PathBuf,
    quiet: bool,
) -> Result<ExitCode> {
    let settings = wizard::SessionSettings {
        output_dir,
        render: config.render_settings(),
        extras: args.extras.to_extras(&config.cache_max_age),
        dry_run: args.dry_run,
    };

    settings.validate()?;

    let outcome = if io::stdin().is_terminal() && console::user_attended() {
        run_prompted(&mut TermPrompter::stdout(), &settings, quiet)?
    } else {
        let stdin = io::stdin();
        run_prompted(&mut Prompter::new(stdin.lock(), io::stdout()), &settings, quiet)?
    };
    debug!(?outcome, "session finished");
    Ok(ExitCode::from(outcome.exit_code()))
}

fn run_prompted<P: Prompt>(
    prompter: &mut P,
    settings: &wizard::SessionSettings,
    quiet: bool,
) -> Result<wizard::SessionOutcome> {
    if !quiet {
        prompter.say(style(get_banner().trim_start_matches('\n')).cyan())?;
        prompter.say(format!(
            "{} {}",
            style("vhostgen").cyan().bold(),
            style(get_version()).dim()
        ))?;
        prompter.say("")?;
    }

    wizard::run_session(prompter, settings)
}
