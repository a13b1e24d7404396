use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::config::DeploymentMode;

/// Client-facing error taxonomy. Internal detail is carried alongside the
/// response mapping but only exposed outside production.
#[derive(Debug)]
pub enum ApiError {
    InvalidTarget,
    UnsupportedTool(String),
    Timeout,
    Internal { detail: String, expose: bool },
}

impl ApiError {
    pub fn internal(detail: impl Into<String>, mode: DeploymentMode) -> Self {
        ApiError::Internal {
            detail: detail.into(),
            expose: !mode.is_production(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::InvalidTarget => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid or disallowed target"})),
            )
                .into_response(),
            ApiError::UnsupportedTool(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": message})),
            )
                .into_response(),
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                Json(json!({"error": "Scan timed out"})),
            )
                .into_response(),
            ApiError::Internal { detail, expose } => {
                let body = if expose {
                    json!({"error": "Scan failed", "details": detail})
                } else {
                    json!({"error": "Scan failed"})
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_internal_detail_exposed_in_development() {
        let response =
            ApiError::internal("connection refused", DeploymentMode::Development).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Scan failed");
        assert_eq!(body["details"], "connection refused");
    }

    #[tokio::test]
    async fn test_internal_detail_withheld_in_production() {
        let response =
            ApiError::internal("connection refused", DeploymentMode::Production).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Scan failed");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_timeout_maps_to_408() {
        let response = ApiError::Timeout.into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_target_maps_to_400_with_fixed_message() {
        let response = ApiError::InvalidTarget.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid or disallowed target");
    }
}
