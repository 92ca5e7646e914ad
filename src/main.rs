//! fieldlog command-line interface.

mod commands;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use fieldlog::export::ExportKind;
use fieldlog::ui::print_message_box;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fieldlog", version, about = "Offline geotagged field observations")]
struct Cli {
    /// Configuration file (default: <data dir>/fieldlog.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record database file (overrides store.path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new observation
    Add(AddArgs),
    /// List stored observations, newest first
    List,
    /// Delete one observation by id
    Delete {
        /// Record id
        id: String,
    },
    /// Delete every stored observation
    Clear {
        /// Confirm deleting all records
        #[arg(long)]
        yes: bool,
    },
    /// Export all observations
    Export {
        /// Artifact kind
        #[arg(value_enum)]
        kind: ExportKind,
        /// Output directory (overrides export.dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// Inputs for `fieldlog add`.
#[derive(Args)]
pub struct AddArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// Horizontal accuracy in meters
    #[arg(long)]
    accuracy: Option<f64>,
    /// Fix time as RFC 3339 (default: now)
    #[arg(long)]
    time: Option<DateTime<Utc>>,
    /// Free-text note
    #[arg(long, default_value = "")]
    note: String,
    /// Photo file to attach
    #[arg(long)]
    photo: Option<PathBuf>,
    /// Photo MIME type (default: guessed from the file name)
    #[arg(long)]
    mime: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = commands::Context::load(cli.config.as_deref(), cli.db.as_deref())?;

    match cli.command {
        Commands::Add(args) => commands::add::execute(&ctx, args).await,
        Commands::List => commands::list::execute(&ctx).await,
        Commands::Delete { id } => commands::remove::delete(&ctx, &id).await,
        Commands::Clear { yes } => commands::remove::clear(&ctx, yes).await,
        Commands::Export { kind, out_dir } => {
            commands::export::execute(&ctx, kind, out_dir.as_deref()).await
        },
    }
}

/// Print user-facing conditions as a message box, faults with their chain.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<fieldlog::Error>() {
        Some(fieldlog::Error::EmptyDataset) => print_message_box(
            "No Records",
            "There is nothing to export yet.\nSave an observation first:\n  fieldlog add --lat <deg> --lon <deg>",
        ),
        Some(e) if e.is_user_facing() => print_message_box("Cannot Continue", &e.to_string()),
        _ => eprintln!("Error: {err:#}"),
    }
}

/// Initialize stderr logging. `FIELDLOG_LOG_FORMAT=json` switches to JSON lines.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = if verbose { "fieldlog=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let json = std::env::var("FIELDLOG_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let (plain, json) = if json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (Some(fmt::layer().with_writer(std::io::stderr)), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}
