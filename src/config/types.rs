use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Deployment mode, injected explicitly into the executor and handlers.
/// Production never shells out and withholds error detail from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Production,
    Development,
}

impl DeploymentMode {
    /// Only the literal `production` selects production; anything else is a
    /// development deployment.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("production") {
            DeploymentMode::Production
        } else {
            DeploymentMode::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, DeploymentMode::Production)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_mode")]
    pub mode: DeploymentMode,
    /// Bearer token -> user id. Empty map disables enforcement and requests
    /// are attributed to `anonymous`.
    #[serde(default)]
    pub api_tokens: HashMap<String, String>,
    #[serde(default = "default_nmap_binary")]
    pub nmap_binary: String,
    #[serde(default = "default_nmap_timeout_secs")]
    pub nmap_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_mode() -> DeploymentMode {
    DeploymentMode::Development
}

fn default_nmap_binary() -> String {
    "nmap".to_string()
}

fn default_nmap_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mode: default_mode(),
            api_tokens: HashMap::new(),
            nmap_binary: default_nmap_binary(),
            nmap_timeout_secs: default_nmap_timeout_secs(),
        }
    }
}
