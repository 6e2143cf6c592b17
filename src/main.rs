mod calc;
mod cmd;
mod data;
mod error;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mlf", about = "monthly labor forecast: weekly hours distribution")]
struct Cli {
    /// Path to the data directory containing config and forecast files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Treat this date (YYYY-MM-DD) as today instead of reading the system clock
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files with defaults and sample forecast lines
    Init,
    /// List the forecast weeks and which are frozen
    Weeks,
    /// Distribute a quantity across the forecast weeks
    Distribute {
        /// Total to-go quantity
        #[arg(long)]
        total: f64,
        /// Start date token (e.g. 04-Aug-25)
        #[arg(long)]
        start: String,
        /// End date token (e.g. 15-Aug-25)
        #[arg(long)]
        end: String,
        /// Previously stored values per week, comma separated
        #[arg(long, value_delimiter = ',')]
        existing: Vec<f64>,
        /// Recompute past weeks instead of freezing them
        #[arg(long)]
        no_preserve: bool,
        /// Reject malformed date tokens instead of falling back to today
        #[arg(long)]
        strict: bool,
    },
    /// Recalculate every forecast line and save the result
    Recalc {
        /// Print the result without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Compare original baseline and updated allocation per line
    Variance {
        /// Only report this forecast line
        #[arg(long)]
        id: Option<String>,
    },
    /// Print the stored forecast grid
    Show {
        /// Show craft headcount instead of hours
        #[arg(long)]
        workforce: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    let today = resolve_today(cli.today.as_deref())?;

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Commands::Init);
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        Commands::Init => cmd::init::run(),
        Commands::Weeks => cmd::weeks::run(today),
        Commands::Distribute {
            total,
            start,
            end,
            existing,
            no_preserve,
            strict,
        } => cmd::distribute::run(
            cmd::distribute::DistributeArgs {
                total,
                start,
                end,
                existing,
                preserve_past: !no_preserve,
                strict,
            },
            today,
        ),
        Commands::Recalc { dry_run } => cmd::recalc::run(dry_run, today),
        Commands::Variance { id } => cmd::variance::run(id.as_deref(), today),
        Commands::Show { workforce } => cmd::show::run(workforce, today),
    }
}

/// The injected `--today` date, or the local system date.
fn resolve_today(arg: Option<&str>) -> anyhow::Result<NaiveDate> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid --today date '{}', expected YYYY-MM-DD", raw)),
        None => Ok(Local::now().date_naive()),
    }
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
