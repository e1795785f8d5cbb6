//! Batch Bridge Server - Entry Point
//!
//! HTTP front end for a flat-file user registry and a single-instance
//! external batch executable.

use log::{error, info};
use std::process::ExitCode;

use batch_bridge_server::Server;
use batch_bridge_server::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching batch bridge server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::bind(&config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.start().await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
