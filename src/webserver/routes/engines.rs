use std::sync::Arc;

use axum::{extract::State, response::Response, routing::get, Router};
use serde_json::json;

use crate::webserver::{state::AppState, utils::success_response};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/engines", get(list_engines))
}

/// GET /engines — available analysis engines
async fn list_engines(State(state): State<Arc<AppState>>) -> Response {
    let pantheon = state.analyzer.pantheon();

    let descriptions: serde_json::Map<String, serde_json::Value> = pantheon
        .engine_descriptions()
        .into_iter()
        .map(|(name, description)| (name.to_string(), json!(description)))
        .collect();

    success_response(json!({
        "available_engines": pantheon.available_engines(),
        "descriptions": descriptions,
    }))
}
