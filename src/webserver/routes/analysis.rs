use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analysis::LegendType;
use crate::constants;
use crate::webserver::{
    state::AppState,
    utils::{failure_response, success_response},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(analyze_crypto))
        .route("/scan", post(scan_multiple_pairs))
        .route("/overview", get(market_overview))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub product_id: String,
    #[serde(default)]
    pub legend_type: LegendType,
    #[serde(default = "default_timeframes")]
    pub timeframes: Vec<String>,
    #[serde(default = "default_analyze_candles")]
    pub max_candles: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub product_ids: Vec<String>,
    #[serde(default = "default_scan_engine")]
    pub legend_type: LegendType,
    #[serde(default = "default_scan_timeframe")]
    pub timeframe: String,
    #[serde(default = "default_scan_candles")]
    pub max_candles: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewQuery {
    #[serde(default = "default_popular_only")]
    pub popular_only: bool,
    #[serde(default)]
    pub legend_type: LegendType,
}

fn default_timeframes() -> Vec<String> {
    constants::DEFAULT_ANALYSIS_TIMEFRAMES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_analyze_candles() -> usize {
    constants::DEFAULT_ANALYZE_MAX_CANDLES
}

fn default_scan_engine() -> LegendType {
    LegendType::Scanner
}

fn default_scan_timeframe() -> String {
    "5m".to_string()
}

fn default_scan_candles() -> usize {
    constants::DEFAULT_SCAN_MAX_CANDLES
}

fn default_popular_only() -> bool {
    true
}

/// POST /analyze — analyze one pair across timeframes
async fn analyze_crypto(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    match state
        .analyzer
        .analyze_crypto_pair(
            &request.product_id,
            request.legend_type,
            &request.timeframes,
            request.max_candles,
        )
        .await
    {
        // Echo the effective request so callers see the applied defaults
        Ok(results) => success_response(json!({ "request": request, "results": results })),
        Err(e) => failure_response("Analysis failed", &e),
    }
}

/// POST /scan — scan many pairs for opportunities
async fn scan_multiple_pairs(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScanRequest>,
) -> Response {
    let (results, summary) = state
        .analyzer
        .scan_multiple_pairs(
            &request.product_ids,
            request.legend_type,
            &request.timeframe,
            request.max_candles,
        )
        .await;

    success_response(json!({
        "request": request,
        "summary": summary,
        "results": results,
    }))
}

/// GET /overview — market overview across pairs
async fn market_overview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OverviewQuery>,
) -> Response {
    match state
        .analyzer
        .get_market_overview(query.popular_only, query.legend_type)
        .await
    {
        Ok(overview) => success_response(json!({ "overview": overview })),
        Err(e) => failure_response("Market overview failed", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_fills_defaults() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"product_id": "BTC-USD"}"#).unwrap();
        assert_eq!(request.legend_type, LegendType::Traditional);
        assert_eq!(request.timeframes, vec!["5m", "15m", "1h"]);
        assert_eq!(request.max_candles, 200);
    }

    #[test]
    fn scan_request_defaults_to_scanner_engine() {
        let request: ScanRequest =
            serde_json::from_str(r#"{"product_ids": ["BTC-USD", "ETH-USD"]}"#).unwrap();
        assert_eq!(request.legend_type, LegendType::Scanner);
        assert_eq!(request.timeframe, "5m");
        assert_eq!(request.max_candles, 100);
    }

    #[test]
    fn analyze_request_echo_carries_applied_defaults() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"product_id": "BTC-USD"}"#).unwrap();
        let echo = serde_json::to_value(&request).unwrap();
        assert_eq!(echo["product_id"], "BTC-USD");
        assert_eq!(echo["legend_type"], "traditional");
        assert_eq!(echo["max_candles"], 200);
    }

    #[test]
    fn scan_request_echo_carries_applied_defaults() {
        let request: ScanRequest =
            serde_json::from_str(r#"{"product_ids": ["BTC-USD"]}"#).unwrap();
        let echo = serde_json::to_value(&request).unwrap();
        assert_eq!(echo["legend_type"], "scanner");
        assert_eq!(echo["timeframe"], "5m");
        assert_eq!(echo["max_candles"], 100);
    }

    #[test]
    fn overview_query_defaults_to_popular_only() {
        let query: OverviewQuery = serde_json::from_str("{}").unwrap();
        assert!(query.popular_only);
        assert_eq!(query.legend_type, LegendType::Traditional);
    }
}
