use axum::body::Body;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use scandeck::api::{build_router, create_app_state, AppState};
use scandeck::config::{DeploymentMode, ServerConfig};

const TOKEN: &str = "test-token";

fn test_config(mode: DeploymentMode) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.mode = mode;
    config.api_tokens.insert(TOKEN.to_string(), "user-1".to_string());
    // A binary that cannot exist; tests that want a real spawn override this.
    config.nmap_binary = "/nonexistent/nmap-should-not-run".to_string();
    config
}

fn test_state(mode: DeploymentMode) -> AppState {
    create_app_state(&test_config(mode))
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

#[tokio::test]
async fn test_health_endpoint_needs_no_auth() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request("GET", "/health", None, None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "scandeck");
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request("GET", "/scan/tools", None, None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Missing Authorization header");
}

#[tokio::test]
async fn test_wrong_token_rejected() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request("GET", "/scan/tools", Some("wrong"), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid API token");
}

#[tokio::test]
async fn test_no_configured_tokens_resolves_anonymous() {
    let mut config = test_config(DeploymentMode::Production);
    config.api_tokens.clear();
    let state = create_app_state(&config);

    let req = make_request("POST", "/scan/nmap", None, Some(json!({"target": "localhost"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["userId"], "anonymous");
}

#[tokio::test]
async fn test_production_nmap_is_always_simulated() {
    // nmap_binary points at a nonexistent path, so a 200 here proves no
    // process was spawned.
    let state = test_state(DeploymentMode::Production);
    let req = make_request(
        "POST",
        "/scan/nmap",
        Some(TOKEN),
        Some(json!({"target": "scanme.nmap.org"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["simulated"], true);
    assert_eq!(body["target"], "scanme.nmap.org");
    assert_eq!(body["userId"], "user-1");
    assert!(body["output"].as_str().unwrap().contains("Nmap scan report for scanme.nmap.org"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_nmap_rejects_unlisted_target() {
    let state = test_state(DeploymentMode::Production);
    let req = make_request(
        "POST",
        "/scan/nmap",
        Some(TOKEN),
        Some(json!({"target": "internal.corp.example"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid or disallowed target");
}

#[tokio::test]
async fn test_nmap_rejects_shell_metacharacters() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request(
        "POST",
        "/scan/nmap",
        Some(TOKEN),
        Some(json!({"target": "localhost; rm -rf /"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nmap_rejects_missing_target() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request("POST", "/scan/nmap", Some(TOKEN), Some(json!({})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_development_nmap_failure_degrades_to_simulation() {
    // `false` exits non-zero immediately; the response must still be a 200
    // with simulated output, never a 500.
    let mut config = test_config(DeploymentMode::Development);
    config.nmap_binary = "false".to_string();
    let state = create_app_state(&config);

    let req = make_request("POST", "/scan/nmap", Some(TOKEN), Some(json!({"target": "localhost"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["simulated"], true);
    assert!(body["output"].as_str().unwrap().contains("localhost"));
}

#[tokio::test]
async fn test_development_nmap_timeout_returns_408() {
    // A script that ignores the injected nmap flags and sleeps past the
    // timeout; only the enforced timeout ends it.
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "#!/bin/sh\nsleep 60").unwrap();
    let path = file.into_temp_path();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut config = test_config(DeploymentMode::Development);
    config.nmap_binary = path.to_str().unwrap().to_string();
    config.nmap_timeout_secs = 1;
    let state = create_app_state(&config);

    let req = make_request("POST", "/scan/nmap", Some(TOKEN), Some(json!({"target": "localhost"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    let body = response_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test(start_paused = true)]
async fn test_sqlmap_is_simulated_in_every_mode() {
    for mode in [DeploymentMode::Production, DeploymentMode::Development] {
        let state = test_state(mode);
        let req = make_request(
            "POST",
            "/scan/sqlmap",
            Some(TOKEN),
            Some(json!({"target": "example.com"})),
        );
        let response = app(&state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["simulated"], true);
        assert!(body["note"].is_string());
        assert!(body["output"].as_str().unwrap().contains("sqlmap"));
        assert_eq!(body["userId"], "user-1");
    }
}

#[tokio::test(start_paused = true)]
async fn test_generic_tool_scan() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request(
        "POST",
        "/scan/burp",
        Some(TOKEN),
        Some(json!({"target": "test.com"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["tool"], "burp");
    assert_eq!(body["toolName"], "Burp Suite");
    assert_eq!(body["simulated"], true);
    assert!(body["output"].as_str().unwrap().contains("test.com"));
}

#[tokio::test]
async fn test_unsupported_tool_lists_supported_ids() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request(
        "POST",
        "/scan/foo",
        Some(TOKEN),
        Some(json!({"target": "localhost"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    let msg = body["error"].as_str().unwrap();
    assert!(msg.contains("foo"));
    assert!(msg.contains("nmap"));
    assert!(msg.contains("sqlmap"));
}

#[tokio::test]
async fn test_case_variant_nmap_path_never_reaches_real_execution() {
    // /scan/NMAP misses the literal /scan/nmap route and falls through to
    // the generic route; that route must refuse it rather than run the
    // executor's real-process path.
    let mut config = test_config(DeploymentMode::Development);
    config.nmap_binary = "echo".to_string();
    let state = create_app_state(&config);

    let req = make_request(
        "POST",
        "/scan/NMAP",
        Some(TOKEN),
        Some(json!({"target": "localhost"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    let msg = body["error"].as_str().unwrap();
    assert!(msg.contains("/scan/nmap"));
}

#[tokio::test]
async fn test_generic_route_refuses_sqlmap() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request(
        "POST",
        "/scan/Sqlmap",
        Some(TOKEN),
        Some(json!({"target": "localhost"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("/scan/sqlmap"));
}

#[tokio::test]
async fn test_history_mirrors_mode_flag() {
    for (mode, expected) in [
        (DeploymentMode::Production, true),
        (DeploymentMode::Development, false),
    ] {
        let state = test_state(mode);
        let req = make_request("GET", "/scan/history", Some(TOKEN), None);
        let response = app(&state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        let history = body["history"].as_array().unwrap();
        assert!(!history.is_empty());
        let nmap_entry = history.iter().find(|e| e["tool"] == "nmap").unwrap();
        assert_eq!(nmap_entry["simulated"], expected);
        assert!(body["note"].is_string());
    }
}

#[tokio::test]
async fn test_tools_catalog() {
    let state = test_state(DeploymentMode::Development);
    let req = make_request("GET", "/scan/tools", Some(TOKEN), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let tools = body["tools"].as_array().unwrap();
    let nmap = tools.iter().find(|t| t["id"] == "nmap").unwrap();
    assert_eq!(nmap["name"], "Nmap");
    assert!(nmap["description"].is_string());
    assert!(tools.iter().any(|t| t["id"] == "wireshark"));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_identical_requests_are_independent() {
    let state = test_state(DeploymentMode::Production);
    let body = json!({"target": "example.com"});

    let first = app(&state).oneshot(make_request("POST", "/scan/sqlmap", Some(TOKEN), Some(body.clone())));
    let second = app(&state).oneshot(make_request("POST", "/scan/sqlmap", Some(TOKEN), Some(body)));

    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap().status(), StatusCode::OK);
    assert_eq!(second.unwrap().status(), StatusCode::OK);
}
