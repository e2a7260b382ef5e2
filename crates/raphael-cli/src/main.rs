#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use raphael_core::config::{EffectiveConfig, resolve_config};
use raphael_core::error::ErrorCode;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rc: browse the Raphael Capital track record",
    long_about = None
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format: pretty, text, json.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Catalog export to read (overrides RAPHAEL_CATALOG and config).
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Browse",
        about = "List projects in the track record",
        long_about = "List projects filtered by sector and status, one page at a time.",
        after_help = "EXAMPLES:\n    # First page of everything\n    rc projects\n\n    # Previous retail projects, two pages deep\n    rc projects --sector Retail --status previous --more 1\n\n    # Emit machine-readable output\n    rc projects --json"
    )]
    Projects(cmd::projects::ProjectsArgs),

    #[command(
        next_help_heading = "Browse",
        about = "List filter options",
        long_about = "List the sector and status filters with the number of projects each shows.",
        after_help = "EXAMPLES:\n    rc sectors\n\n    rc sectors --format text"
    )]
    Sectors(cmd::sectors::SectorsArgs),

    #[command(
        next_help_heading = "Browse",
        about = "Show one project",
        long_about = "Show a project's details together with its related projects.",
        after_help = "EXAMPLES:\n    rc show the-exchange\n\n    rc show the-exchange --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Browse",
        about = "Rank related projects",
        long_about = "Rank the projects most related to a reference project and show each score's parts.",
        after_help = "EXAMPLES:\n    rc related the-exchange\n\n    # Widen the list\n    rc related the-exchange --limit 6"
    )]
    Related(cmd::related::RelatedArgs),

    #[command(
        next_help_heading = "Browse",
        about = "List featured projects",
        after_help = "EXAMPLES:\n    rc featured --format text"
    )]
    Featured(cmd::featured::FeaturedArgs),

    #[command(
        next_help_heading = "Diagnose",
        about = "Show the canonical project ordering",
        long_about = "List projects by ordering weight, highest first, with unranked projects last.",
        after_help = "EXAMPLES:\n    rc orders\n\n    # Only projects missing a weight\n    rc orders --unranked"
    )]
    Orders(cmd::orders::OrdersArgs),

    #[command(
        next_help_heading = "Diagnose",
        about = "Validate the catalog export",
        long_about = "Load the catalog export and report kept, ignored and skipped documents.",
        after_help = "EXAMPLES:\n    rc check\n\n    # Fail CI when any document is skipped\n    rc check --strict --catalog content/export.ndjson"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Site",
        about = "Validate a contact-form submission",
        long_about = "Validate a contact-form submission and print the notification email it would produce.",
        after_help = "EXAMPLES:\n    rc contact --name \"Jane Doe\" --email jane@example.com --message \"Hello\""
    )]
    Contact(cmd::contact::ContactArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    rc completions bash > ~/.local/share/bash-completion/completions/rc"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

impl Commands {
    const fn needs_config(&self) -> bool {
        !matches!(self, Self::Contact(_) | Self::Completions(_))
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("RAPHAEL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else if verbose || env::var("DEBUG").is_ok() {
            "raphael=debug,info"
        } else {
            "raphael=info,warn"
        })
    });

    let format = env::var("RAPHAEL_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(std::io::stderr);

    match format.as_str() {
        "json" => registry.with(layer.json().with_ansi(false)).init(),
        _ => registry.with(layer.compact()).init(),
    }
}

/// Settle config and output mode. A broken config file is reported in
/// whatever mode the flags and environment alone select.
fn load_settings(cli: &Cli, project_root: &std::path::Path) -> anyhow::Result<(EffectiveConfig, OutputMode)> {
    match resolve_config(project_root, cli.catalog.as_deref()) {
        Ok(config) => {
            let output = resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());
            debug!(catalog = %config.catalog_path.display(), ?output, "settings resolved");
            Ok((config, output))
        }
        Err(err) => {
            let output = resolve_output_mode(cli.format, cli.json, None);
            render_error(
                output,
                &CliError::coded(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            Err(err)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if !cli.command.needs_config() {
        let output = resolve_output_mode(cli.format, cli.json, None);
        return match &cli.command {
            Commands::Contact(args) => cmd::contact::run_contact(args, output),
            Commands::Completions(args) => {
                let mut command = Cli::command();
                cmd::completions::run_completions(args.shell, &mut command)
            }
            _ => Ok(()),
        };
    }

    let project_root = env::current_dir()?;
    let (config, output) = load_settings(&cli, &project_root)?;

    match &cli.command {
        Commands::Projects(args) => cmd::projects::run_projects(args, output, &config),
        Commands::Sectors(args) => cmd::sectors::run_sectors(args, output, &config),
        Commands::Show(args) => cmd::show::run_show(args, output, &config),
        Commands::Related(args) => cmd::related::run_related(args, output, &config),
        Commands::Featured(args) => cmd::featured::run_featured(args, output, &config),
        Commands::Orders(args) => cmd::orders::run_orders(args, output, &config),
        Commands::Check(args) => cmd::check::run_check(args, output, &config),
        Commands::Contact(_) | Commands::Completions(_) => Ok(()),
    }
}
