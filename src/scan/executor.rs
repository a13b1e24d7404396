use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::DeploymentMode;
use super::simulator;
use super::target::ScanTarget;
use super::tool::ToolIdentifier;

/// Artificial latency applied to simulated sqlmap scans.
pub const SQLMAP_DELAY: Duration = Duration::from_millis(2000);
/// Artificial latency applied to the other simulated tools.
pub const GENERIC_DELAY: Duration = Duration::from_millis(1500);
/// Wall-clock bound on a real nmap invocation.
pub const DEFAULT_NMAP_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of the process-invocation boundary. `ProcessFailed` is consumed
/// inside the executor (it falls back to simulated output) and never reaches
/// the request handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Success { output: String, simulated: bool },
    TimedOut,
    ProcessFailed(String),
}

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub mode: DeploymentMode,
    pub nmap_binary: String,
    pub nmap_timeout: Duration,
}

impl ExecutorConfig {
    pub fn new(mode: DeploymentMode) -> Self {
        Self {
            mode,
            nmap_binary: "nmap".to_string(),
            nmap_timeout: DEFAULT_NMAP_TIMEOUT,
        }
    }
}

pub struct ScanExecutor {
    config: ExecutorConfig,
}

impl ScanExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn mode(&self) -> DeploymentMode {
        self.config.mode
    }

    /// Run a scan for the given tool. Only nmap in development mode touches a
    /// real process; every other path resolves through the simulator.
    pub async fn execute(&self, tool: ToolIdentifier, target: &ScanTarget) -> ScanOutcome {
        match tool {
            ToolIdentifier::Nmap => self.execute_nmap(target).await,
            ToolIdentifier::Sqlmap => {
                tokio::time::sleep(SQLMAP_DELAY).await;
                ScanOutcome::Success {
                    output: simulator::simulate(tool, target.as_str()),
                    simulated: true,
                }
            }
            _ => {
                tokio::time::sleep(GENERIC_DELAY).await;
                ScanOutcome::Success {
                    output: simulator::simulate(tool, target.as_str()),
                    simulated: true,
                }
            }
        }
    }

    async fn execute_nmap(&self, target: &ScanTarget) -> ScanOutcome {
        if self.config.mode == DeploymentMode::Production {
            // Production never shells out based on user-supplied input.
            debug!(target = %target, "Production mode, returning simulated nmap report");
            return ScanOutcome::Success {
                output: simulator::simulate(ToolIdentifier::Nmap, target.as_str()),
                simulated: true,
            };
        }

        match self.run_nmap_process(target).await {
            ScanOutcome::ProcessFailed(reason) => {
                warn!(target = %target, %reason, "nmap invocation failed, falling back to simulated output");
                ScanOutcome::Success {
                    output: simulator::simulate(ToolIdentifier::Nmap, target.as_str()),
                    simulated: true,
                }
            }
            outcome => outcome,
        }
    }

    /// Spawn `nmap -sV -T4 <target>` with argument-vector invocation (no
    /// shell) under a caller-enforced wall-clock timeout. On timeout the
    /// child is killed and any partial output discarded.
    async fn run_nmap_process(&self, target: &ScanTarget) -> ScanOutcome {
        debug!(binary = %self.config.nmap_binary, target = %target, "Spawning nmap");

        let child = Command::new(&self.config.nmap_binary)
            .args(["-sV", "-T4"])
            .arg(target.as_str())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => return ScanOutcome::ProcessFailed(format!("Failed to spawn nmap: {}", e)),
        };

        // Dropping the wait future on timeout (or request cancellation) kills
        // the child via kill_on_drop.
        match tokio::time::timeout(self.config.nmap_timeout, child.wait_with_output()).await {
            Err(_) => ScanOutcome::TimedOut,
            Ok(Err(e)) => ScanOutcome::ProcessFailed(format!("Failed to collect nmap output: {}", e)),
            Ok(Ok(output)) => {
                if output.status.success() {
                    ScanOutcome::Success {
                        output: String::from_utf8_lossy(&output.stdout).into_owned(),
                        simulated: false,
                    }
                } else {
                    ScanOutcome::ProcessFailed(format!(
                        "nmap exited with {}: {}",
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    ))
                }
            }
        }
    }
}
