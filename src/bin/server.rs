//! Day-ahead price HTTP server.
//!
//! Serves the index, health check, and on-demand day-price views. The
//! configuration is validated before the listener binds; a broken
//! configuration halts startup.

use std::sync::Arc;

use dotenvy::dotenv;
use gridwatch::config::{self, Config};
use gridwatch::core::http::{start_server, AppState};
use gridwatch::logging;
use gridwatch::services::{loader, messenger};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let loader = match loader::from_config(&config.loader) {
        Ok(loader) => loader,
        Err(e) => {
            error!(error = %e, "failed to build price loader");
            std::process::exit(1);
        }
    };

    let messenger = match messenger::from_config(&config.messenger) {
        Ok(messenger) => messenger,
        Err(e) => {
            error!(error = %e, "failed to build messenger");
            std::process::exit(1);
        }
    };

    let port = config.server.port;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config::get_environment(),
        port = port,
        "starting day-ahead price server"
    );

    let state = AppState {
        config: Arc::new(config),
        loader,
        messenger,
    };

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("shutting down server");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }
}
