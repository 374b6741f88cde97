use wi_server::{build_server, logger};

use std::error::Error;

use log::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = wi_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting wi-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    let server = build_server(config, &database_path).await?;

    tokio::select! {
        result = server.serve_stdio() => {
            if let Err(e) = &result {
                error!("MCP transport failed: {}", e);
            }
            result?;
            info!("stdin closed, shutting down");
        }
        () = shutdown_signal() => {
            info!("Received SIGINT (Ctrl+C), shutting down");
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for SIGINT: {}", e);
        std::future::pending::<()>().await;
    }
}
