use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use intake_cli::commands::{entries, log, plot, remove, summary};
use intake_cli::{Cli, Commands, Config, clock};
use intake_store::Tracker;

/// Opens the configured store, loading it under the lock.
fn open_tracker(config: &Config) -> Result<Tracker> {
    Tracker::open(config.record_store())
        .with_context(|| format!("failed to open {}", config.data_path.display()))
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

    let Some(command) = cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    // Resolved once so every "today" in this command agrees.
    let today = clock::today_in(config.tz()?);
    tracing::debug!(%today, timezone = %config.timezone, "resolved today");

    let mut tracker = open_tracker(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Summary { date, json } => {
            summary::run(&mut out, &tracker, date.resolve(today)?, json)?;
        }
        Commands::Sleep { hours, date } => {
            log::sleep(&mut out, &mut tracker, date.resolve(today)?, hours)?;
        }
        Commands::Water { ml, date } => {
            log::water(&mut out, &mut tracker, date.resolve(today)?, ml)?;
        }
        Commands::Food { entries, date } => {
            log::food(&mut out, &mut tracker, date.resolve(today)?, entries)?;
        }
        Commands::Entries { date, json } => {
            entries::run(&mut out, &tracker, date.resolve(today)?, json)?;
        }
        Commands::Remove(args) => {
            let date = args.date.resolve(today)?;
            remove::run(&mut out, &mut tracker, date, &args)?;
        }
        Commands::Plot { metric, json } => {
            plot::run(&mut out, &tracker, metric, json)?;
        }
    }

    out.flush()?;
    Ok(())
}
