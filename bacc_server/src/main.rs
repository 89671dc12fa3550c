//! Shared-shoe baccarat table server.
//!
//! Seeds (or resumes) the shoe under the data directory and serves the
//! line protocol until a client sends `exit`.

mod config;

use std::sync::Arc;

use anyhow::{Error, bail};
use baccarat::{Table, server};
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;

use config::{Overrides, ServerConfig};

const HELP: &str = "\
Run a shared-shoe baccarat table server

USAGE:
  bacc_server [OPTIONS] [PORT] [DECKS]

ARGS:
  PORT                     Port to listen on  [default: env BACCARAT_PORT or 3000]
  DECKS                    Decks to shuffle into the shoe  [default: env BACCARAT_DECKS or 1]

OPTIONS:
  --host       IP          Address to bind  [default: env BACCARAT_HOST or 127.0.0.1]
  --data-dir   DIR         Where cards.db, game_history.csv and balances live  [default: env BACCARAT_DATA_DIR or .]
  --workers    N           Sessions served at once  [default: env BACCARAT_WORKERS or 10]

FLAGS:
  --resume                 Continue from the existing cards.db instead of shuffling
  -h, --help               Print help information

ENVIRONMENT:
  BACCARAT_HISTORY_BATCH   Outcomes per game_history.csv line  [default: 6]
  RUST_LOG                 Log filter  [default: info]
  (A .env file in the working directory is loaded first)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let mut overrides = Overrides {
        host: pargs.opt_value_from_str("--host")?,
        data_dir: pargs.opt_value_from_str("--data-dir")?,
        workers: pargs.opt_value_from_str("--workers")?,
        resume: pargs.contains("--resume"),
        ..Overrides::default()
    };
    // Free arguments come last so options aren't mistaken for them.
    overrides.port = pargs.opt_free_from_str()?;
    overrides.decks = pargs.opt_free_from_str()?;
    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("unexpected arguments: {remaining:?}");
    }

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let config = ServerConfig::from_env(overrides)?;
    config.validate()?;

    let table = Arc::new(Table::open(&config.table)?);
    info!(
        "Starting baccarat server at {} with {} worker(s)",
        config.bind, config.workers
    );

    server::run(config.bind, table, config.workers).await?;
    info!("Server stopped");
    Ok(())
}
