use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::json;

use super::AppState;

/// Identity resolved from the bearer token, attached as a request extension.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

pub async fn api_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    // No configured tokens means enforcement is off.
    if state.api_tokens.is_empty() {
        request.extensions_mut().insert(AuthUser {
            id: "anonymous".to_string(),
        });
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(header) if header.starts_with("Bearer ") => {
            let token = &header[7..];
            match state.api_tokens.get(token) {
                Some(user_id) => {
                    request.extensions_mut().insert(AuthUser {
                        id: user_id.clone(),
                    });
                    Ok(next.run(request).await)
                }
                None => Err((
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": "Invalid API token"})),
                )),
            }
        }
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing Authorization header"})),
        )),
    }
}
