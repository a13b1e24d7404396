use std::path::Path;

use crate::errors::ScandeckError;
use super::types::ServerConfig;

/// Load a YAML server configuration from disk. Missing fields fall back to
/// the serde defaults on `ServerConfig`.
pub async fn parse_config(path: &Path) -> Result<ServerConfig, ScandeckError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        ScandeckError::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;

    let config: ServerConfig = serde_yaml::from_str(&content)?;

    Ok(config)
}
