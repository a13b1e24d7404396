use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::api::errors::ApiError;
use crate::api::models::ScanRequest;
use crate::api::AppState;
use crate::scan::{ScanOutcome, ScanTarget, ToolIdentifier};

fn parse_target(req: &ScanRequest) -> Result<ScanTarget, ApiError> {
    let raw = req.target.as_deref().unwrap_or("");
    ScanTarget::parse(raw).map_err(|_| ApiError::InvalidTarget)
}

pub async fn scan_nmap(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<Value>, ApiError> {
    let target = parse_target(&req)?;
    let scan_id = Uuid::new_v4();
    info!(%scan_id, user = %user.id, target = %target, "nmap scan requested");

    match state.executor.execute(ToolIdentifier::Nmap, &target).await {
        ScanOutcome::Success { output, simulated } => {
            info!(%scan_id, simulated, "nmap scan completed");
            Ok(Json(json!({
                "output": output,
                "target": target.as_str(),
                "timestamp": Utc::now().to_rfc3339(),
                "simulated": simulated,
                "userId": user.id,
            })))
        }
        ScanOutcome::TimedOut => {
            error!(%scan_id, target = %target, "nmap scan timed out");
            Err(ApiError::Timeout)
        }
        ScanOutcome::ProcessFailed(reason) => {
            // The executor absorbs process failures into simulated output;
            // reaching this arm means that contract broke.
            error!(%scan_id, %reason, "process failure escaped the executor");
            Err(ApiError::internal(reason, state.mode))
        }
    }
}

pub async fn scan_sqlmap(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<Value>, ApiError> {
    let target = parse_target(&req)?;
    let scan_id = Uuid::new_v4();
    info!(%scan_id, user = %user.id, target = %target, "sqlmap scan requested");

    match state.executor.execute(ToolIdentifier::Sqlmap, &target).await {
        ScanOutcome::Success { output, simulated } => {
            info!(%scan_id, "sqlmap scan completed");
            Ok(Json(json!({
                "output": output,
                "target": target.as_str(),
                "timestamp": Utc::now().to_rfc3339(),
                "userId": user.id,
                "simulated": simulated,
                "note": "sqlmap scans are always simulated for safety",
            })))
        }
        other => {
            error!(%scan_id, outcome = ?other, "unexpected sqlmap outcome");
            Err(ApiError::internal(
                format!("Unexpected scan outcome: {:?}", other),
                state.mode,
            ))
        }
    }
}

pub async fn scan_generic(
    State(state): State<AppState>,
    Path(tool): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<Value>, ApiError> {
    let tool: ToolIdentifier = tool.parse().map_err(|_| {
        ApiError::UnsupportedTool(format!(
            "Unsupported tool '{}'. Supported tools: {}",
            tool,
            ToolIdentifier::supported_ids()
        ))
    })?;

    // Route matching is case-sensitive, so a case variant like /scan/NMAP
    // lands here instead of the dedicated route. Only the simulation-only
    // tool set may flow through this handler.
    if !tool.is_simulation_only() {
        return Err(ApiError::UnsupportedTool(format!(
            "Tool '{}' has a dedicated route: POST /scan/{}",
            tool.id(),
            tool.id()
        )));
    }

    let target = parse_target(&req)?;
    let scan_id = Uuid::new_v4();
    info!(%scan_id, user = %user.id, tool = %tool, target = %target, "tool scan requested");

    match state.executor.execute(tool, &target).await {
        ScanOutcome::Success { output, simulated } => {
            info!(%scan_id, tool = %tool, "tool scan completed");
            Ok(Json(json!({
                "output": output,
                "target": target.as_str(),
                "tool": tool.id(),
                "toolName": tool.display_name(),
                "timestamp": Utc::now().to_rfc3339(),
                "userId": user.id,
                "simulated": simulated,
                "note": "This tool runs in simulation mode only",
            })))
        }
        other => {
            error!(%scan_id, tool = %tool, outcome = ?other, "unexpected tool outcome");
            Err(ApiError::internal(
                format!("Unexpected scan outcome: {:?}", other),
                state.mode,
            ))
        }
    }
}
