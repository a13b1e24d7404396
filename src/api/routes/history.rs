use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;

/// Static sample data; scan history is not persisted.
pub async fn get_history(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "history": [
            {
                "id": "scan-001",
                "tool": "nmap",
                "target": "scanme.nmap.org",
                "timestamp": "2026-08-20T14:02:11Z",
                "status": "completed",
                "simulated": state.mode.is_production(),
            },
            {
                "id": "scan-002",
                "tool": "sqlmap",
                "target": "example.com",
                "timestamp": "2026-08-21T09:47:30Z",
                "status": "completed",
                "simulated": true,
            },
        ],
        "note": "Scan history persistence is not implemented; sample data shown",
    }))
}
