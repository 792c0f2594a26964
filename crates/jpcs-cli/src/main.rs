//! # jpcs CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Every handler shares one [`LocalStore`] opened from the data
//! directory, so the CLI sees the same collection blobs across runs.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jpcs_store::{DocumentStore, LocalStore};

use jpcs_cli::announce::{run_announce, AnnounceArgs};
use jpcs_cli::badges::{run_badges, BadgesArgs};
use jpcs_cli::checkin::{run_checkin, run_pass, CheckinArgs, PassArgs};
use jpcs_cli::events::{run_events, EventsArgs};
use jpcs_cli::export::{run_export, ExportArgs};
use jpcs_cli::register::{run_register, RegisterArgs};
use jpcs_cli::stats::{run_stats, StatsArgs};
use jpcs_cli::students::{run_students, StudentsArgs};

/// JPCSConnect CLI
///
/// Student event attendance tooling: event catalog, student directory,
/// registrations, QR check-in, announcements, analytics, and CSV export.
#[derive(Parser, Debug)]
#[command(name = "jpcs", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the collection blobs.
    #[arg(long, global = true, default_value = ".jpcs")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Event catalog management (create, list, edit, status, delete).
    Event(EventsArgs),

    /// Student directory management (bootstrap, profiles, edits).
    Student(StudentsArgs),

    /// Registration ledger (add, list, check).
    Register(RegisterArgs),

    /// Check scanned payloads into an event.
    Checkin(CheckinArgs),

    /// Print a student's QR pass payload.
    Pass(PassArgs),

    /// Announcement board (post, list, delete, view).
    Announce(AnnounceArgs),

    /// Custom badge definitions (add, list).
    Badge(BadgesArgs),

    /// Dashboard aggregates (counters, top events, trend, badges).
    Stats(StatsArgs),

    /// Export an event's attendance sheet as CSV.
    Export(ExportArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let store: Arc<dyn DocumentStore> = match LocalStore::open(&cli.data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("failed to open data directory: {e}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Event(args) => run_events(&args, store).await,
        Commands::Student(args) => run_students(&args, store).await,
        Commands::Register(args) => run_register(&args, store).await,
        Commands::Checkin(args) => run_checkin(&args, store).await,
        Commands::Pass(args) => run_pass(&args),
        Commands::Announce(args) => run_announce(&args, store).await,
        Commands::Badge(args) => run_badges(&args, store).await,
        Commands::Stats(args) => run_stats(&args, store).await,
        Commands::Export(args) => run_export(&args, store).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
