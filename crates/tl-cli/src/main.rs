use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_cli::commands::{import, report, status, track};
use tl_cli::{Cli, Commands, Config};
use tl_core::{Timestamp, Tracker};
use tl_store::JsonFileStore;

/// Load config and open the ledger, taking the single-writer lock.
fn open_store(config_path: Option<&Path>) -> Result<JsonFileStore> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    JsonFileStore::open(&config.ledger_path)
        .with_context(|| format!("failed to open {}", config.ledger_path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    let store = open_store(cli.config.as_deref())?;

    match command {
        Commands::ImportLegacy { log, status, force } => {
            let mut store = store;
            import::run(&mut stdout, &mut store, log, status.as_deref(), *force)?;
        }
        Commands::Begin { project } => {
            let mut tracker = Tracker::new(store);
            track::begin(&mut stdout, &mut tracker, project, Timestamp::now())?;
        }
        Commands::Pause => {
            let mut tracker = Tracker::new(store);
            track::pause(&mut stdout, &mut tracker, Timestamp::now())?;
        }
        Commands::End => {
            let mut tracker = Tracker::new(store);
            track::end(&mut stdout, &mut tracker, Timestamp::now())?;
        }
        Commands::Today { json } => {
            report::today(&mut stdout, &Tracker::new(store), Timestamp::now(), *json)?;
        }
        Commands::Report { date, json } => {
            report::run(&mut stdout, &Tracker::new(store), date, *json)?;
        }
        Commands::Status => {
            status::run(&mut stdout, &Tracker::new(store))?;
        }
    }

    Ok(())
}
