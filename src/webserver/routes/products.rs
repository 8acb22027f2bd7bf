use std::sync::Arc;

use axum::{extract::State, response::Response, routing::get, Router};
use serde_json::json;

use crate::webserver::{
    state::AppState,
    utils::{failure_response, success_response},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/products", get(get_products))
}

/// GET /products — available trading pairs
async fn get_products(State(state): State<Arc<AppState>>) -> Response {
    let products = match state.coinbase.get_products().await {
        Ok(products) => products,
        Err(e) => return failure_response("Error fetching products", &e),
    };

    let all_products: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();

    success_response(json!({
        "total_products": products.len(),
        "popular_pairs": state.coinbase.popular_crypto_pairs(),
        "all_products": all_products,
    }))
}
