use std::sync::Arc;

use axum::{extract::State, response::Response, routing::get, Router};
use serde_json::json;

use crate::logger::{self, LogTag};
use crate::webserver::{state::AppState, utils::success_response};

/// Create root and health routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/test", get(test_endpoint))
}

/// GET / — basic server information and endpoint map
async fn root() -> Response {
    success_response(json!({
        "service": "Pantheon Server",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Cryptocurrency analysis server using Pantheon legend engines",
        "endpoints": {
            "health": "/health",
            "engines": "/engines",
            "products": "/products",
            "analyze": "/analyze",
            "scan": "/scan",
            "ema9": "/ema9/:product_id",
            "overview": "/overview",
            "ticker": "/ticker/:product_id",
            "candles": "/candles/:product_id",
            "test": "/test",
        },
    }))
}

/// GET /test — minimal smoke endpoint for dashboards and deploy checks
async fn test_endpoint() -> Response {
    success_response(json!({
        "message": "Pantheon server is working",
        "server_time": chrono::Utc::now(),
    }))
}

/// GET /health — health check for monitoring
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    logger::debug(LogTag::Webserver, "Health check endpoint called");

    let cache_status = match &state.cache {
        Some(cache) => match cache.ping().await {
            Ok(()) => "connected",
            Err(_) => "unreachable",
        },
        None => "disabled",
    };

    success_response(json!({
        "status": "healthy",
        "service": "pantheon-server",
        "uptime_seconds": state.uptime_seconds(),
        "cache": cache_status,
        "coinbase_api": "available",
    }))
}
