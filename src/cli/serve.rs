use std::path::Path;

use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::{self, DeploymentMode, ServerConfig};
use crate::errors::ScandeckError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), ScandeckError> {
    let mut config = match &args.config {
        Some(path) => config::parse_config(Path::new(path)).await?,
        None => ServerConfig::default(),
    };

    // Flags win over the config file.
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(mode) = &args.mode {
        config.mode = DeploymentMode::from_label(mode);
    }

    info!(host = %config.host, port = config.port, mode = ?config.mode, "Starting API server");

    let state = api::create_app_state(&config);
    let app = api::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ScandeckError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
