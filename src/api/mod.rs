pub mod auth;
pub mod errors;
pub mod models;
pub mod routes;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{DeploymentMode, ServerConfig};
use crate::scan::{ExecutorConfig, ScanExecutor};

#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<ScanExecutor>,
    pub mode: DeploymentMode,
    pub api_tokens: Arc<HashMap<String, String>>,
}

pub fn create_app_state(config: &ServerConfig) -> AppState {
    let executor = ScanExecutor::new(ExecutorConfig {
        mode: config.mode,
        nmap_binary: config.nmap_binary.clone(),
        nmap_timeout: Duration::from_secs(config.nmap_timeout_secs),
    });

    AppState {
        executor: Arc::new(executor),
        mode: config.mode,
        api_tokens: Arc::new(config.api_tokens.clone()),
    }
}

pub fn build_router(state: AppState) -> Router {
    let scan_routes = Router::new()
        .route("/scan/nmap", axum::routing::post(routes::scan::scan_nmap))
        .route("/scan/sqlmap", axum::routing::post(routes::scan::scan_sqlmap))
        .route("/scan/history", axum::routing::get(routes::history::get_history))
        .route("/scan/tools", axum::routing::get(routes::tools::list_tools))
        .route("/scan/{tool}", axum::routing::post(routes::scan::scan_generic))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::api_auth_middleware,
        ));

    Router::new()
        .route("/health", axum::routing::get(routes::health::health_check))
        .merge(scan_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
