use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScandeckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Unsupported tool: {0}")]
    UnsupportedTool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
