use axum::Json;
use serde_json::{json, Value};

use crate::scan::tool;

pub async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": tool::catalog() }))
}
