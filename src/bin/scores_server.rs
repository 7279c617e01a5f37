//! High-score server binary.
//!
//! Listens on `BLOCKFALL_SCORES_HOST:BLOCKFALL_SCORES_PORT` and keeps the best
//! `BLOCKFALL_SCORES_CAPACITY` results in memory until shut down.

use anyhow::Result;
use log::info;

use blockfall::config::log_level_from_env;
use blockfall::logging;
use blockfall::scores::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_console(log_level_from_env())?;

    let config = ServerConfig::from_env();
    tokio::select! {
        result = run_server(config, None) => result?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }
    Ok(())
}
