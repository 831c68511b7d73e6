//! Command-line entry point for the daily catcher selection.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use catcher_engine::calendar::HolidayChain;
use catcher_engine::config::ConfigLoader;
use catcher_engine::error::EngineResult;
use catcher_engine::models::RunOutcome;
use catcher_engine::notify::WebhookNotifier;
use catcher_engine::selection::{RunRequest, SelectionEngine};
use catcher_engine::store::Database;

#[derive(Parser)]
#[command(name = "catcher-engine")]
#[command(version)]
#[command(about = "Select and notify the catcher of the day", long_about = None)]
struct Cli {
    /// Path to the scheduler configuration file.
    #[arg(short, long, default_value = "scheduler.yaml")]
    config: String,

    /// Override the selection date (ISO format); defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daily selection (the default when no command is given).
    Run {
        /// Perform all checks without updating the database or notifying.
        #[arg(long)]
        dry_run: bool,

        /// Show weight calculations for all eligible candidates.
        #[arg(long)]
        debug_weights: bool,
    },
    /// Remove selection history older than the retention horizon.
    Cleanup {
        /// Days of history to retain; defaults to the configured horizon.
        #[arg(long)]
        days: Option<u32>,

        /// Show what would be deleted without deleting.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());

    let code = match cli.command.unwrap_or(Commands::Run {
        dry_run: false,
        debug_weights: false,
    }) {
        Commands::Run {
            dry_run,
            debug_weights,
        } => run_selection(&cli.config, today, dry_run, debug_weights),
        Commands::Cleanup { days, dry_run } => run_cleanup(&cli.config, today, days, dry_run),
    };

    std::process::exit(code);
}

fn run_selection(config_path: &str, today: NaiveDate, dry_run: bool, explain: bool) -> i32 {
    if dry_run {
        info!("[dry run] no database changes or notifications will be made");
    }
    match try_run_selection(config_path, today, dry_run, explain) {
        Ok(outcome) => {
            if outcome.is_partial_failure() {
                // Selection is committed; only delivery failed.
                2
            } else {
                0
            }
        }
        Err(e) => {
            error!(error = %e, "fatal error, no selection made");
            1
        }
    }
}

fn try_run_selection(
    config_path: &str,
    today: NaiveDate,
    dry_run: bool,
    explain: bool,
) -> EngineResult<RunOutcome> {
    let loader = ConfigLoader::load(config_path)?;
    let config = loader.config();

    let mut db = Database::open(&config.database.path)?;
    let chain = HolidayChain::from_config(&config.holiday);
    let notifier = WebhookNotifier::from_config(&config.notifier);

    let mut engine = SelectionEngine::new(
        &mut db,
        config,
        &chain,
        chain.table(),
        &notifier,
    );
    let mut rng = StdRng::from_entropy();
    engine.run(
        &RunRequest {
            today,
            dry_run,
            explain,
        },
        &mut rng,
    )
}

fn run_cleanup(config_path: &str, today: NaiveDate, days: Option<u32>, dry_run: bool) -> i32 {
    match try_run_cleanup(config_path, today, days, dry_run) {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "cleanup failed");
            1
        }
    }
}

fn try_run_cleanup(
    config_path: &str,
    today: NaiveDate,
    days: Option<u32>,
    dry_run: bool,
) -> EngineResult<()> {
    let loader = ConfigLoader::load(config_path)?;
    let config = loader.config();
    let retention_days = days.unwrap_or(config.history.retention_days);

    if retention_days < config.history.lookback_days {
        warn!(
            retention_days,
            lookback_days = config.history.lookback_days,
            "retention below the lookback window would starve the weight calculator"
        );
    }

    let db = Database::open(&config.database.path)?;
    info!(retention_days, "cleaning up old selection history");
    let stats = db.prune(today, retention_days, dry_run)?;

    if stats.expired == 0 {
        info!("no old records to clean up");
        return Ok(());
    }

    info!(
        expired = stats.expired,
        total = stats.total,
        cutoff = %stats.cutoff,
        "found records older than the retention horizon"
    );
    if dry_run {
        info!("[dry run] would delete the old records:");
        for (mail, date) in &stats.sample {
            info!("  {mail} on {date}");
        }
        if stats.expired as usize > stats.sample.len() {
            info!("  ... and {} more", stats.expired as usize - stats.sample.len());
        }
    } else {
        info!(
            deleted = stats.deleted,
            retained = stats.total - stats.deleted,
            "cleanup completed successfully"
        );
    }
    Ok(())
}
