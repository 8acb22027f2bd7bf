use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::constants;
use crate::webserver::{
    state::AppState,
    utils::{failure_response, success_response},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ticker/:product_id", get(get_ticker))
        .route("/candles/:product_id", get(get_candles))
        .route("/ema9/:product_id", get(ema9_fakeout_analysis))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandlesQuery {
    #[serde(default = "default_candle_timeframe")]
    pub timeframe: String,
    #[serde(default = "default_candle_limit")]
    pub max_candles: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ema9Query {
    #[serde(default = "default_ema9_limit")]
    pub max_candles: usize,
}

fn default_candle_timeframe() -> String {
    "300".to_string()
}

fn default_candle_limit() -> usize {
    constants::DEFAULT_SCAN_MAX_CANDLES
}

fn default_ema9_limit() -> usize {
    constants::DEFAULT_ANALYZE_MAX_CANDLES
}

/// GET /ticker/:product_id — current ticker for a pair
async fn get_ticker(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Response {
    match state.coinbase.get_product_ticker(&product_id).await {
        Ok(ticker) => success_response(json!({
            "product_id": product_id,
            "ticker": ticker,
        })),
        Err(e) => failure_response("Ticker fetch failed", &e),
    }
}

/// GET /candles/:product_id — historical candle data
async fn get_candles(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
    Query(query): Query<CandlesQuery>,
) -> Response {
    match state
        .coinbase
        .get_product_candles(&product_id, &query.timeframe, query.max_candles)
        .await
    {
        Ok(candles) => success_response(json!({
            "product_id": product_id,
            "timeframe": query.timeframe,
            "candle_count": candles.len(),
            "candles": candles,
        })),
        Err(e) => failure_response("Candles fetch failed", &e),
    }
}

/// GET /ema9/:product_id — EMA(9) multi-timeframe fakeout signals
async fn ema9_fakeout_analysis(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
    Query(query): Query<Ema9Query>,
) -> Response {
    match state
        .analyzer
        .get_ema9_fakeout_signals(&product_id, query.max_candles)
        .await
    {
        Ok(signals) => success_response(json!({
            "product_id": product_id,
            "strategy": "EMA(9) Multi-timeframe Fakeout Detection",
            "signals": signals,
        })),
        Err(e) => failure_response("EMA(9) analysis failed", &e),
    }
}
