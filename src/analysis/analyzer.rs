//! Market analyzer: Coinbase data in, engine reports out

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use super::ema9::{detect_fakeouts, FakeoutSignal};
use super::{EngineReport, LegendType, Pantheon, Signal};
use crate::coinbase::CoinbaseClient;
use crate::constants;
use crate::errors::PantheonResult;
use crate::logger::{self, LogTag};

/// Per-timeframe engine output for one pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeframeAnalysis {
    pub timeframe: String,
    pub candle_count: usize,
    pub last_close: f64,
    pub report: EngineReport,
}

/// Full multi-timeframe analysis of one pair
#[derive(Debug, Clone, Serialize)]
pub struct PairAnalysis {
    pub product_id: String,
    pub engine: LegendType,
    pub timeframes: BTreeMap<String, TimeframeAnalysis>,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of scanning one pair: either a report or an isolated error
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScanOutcome {
    Report(TimeframeAnalysis),
    Failed { error: String },
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ScanOutcome::Report(_))
    }
}

/// Scan results with success/failure accounting
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub total_pairs: usize,
    pub successful_scans: usize,
    pub failed_scans: usize,
    pub success_rate: f64,
}

/// Aggregated overview across many pairs
#[derive(Debug, Clone, Serialize)]
pub struct MarketOverview {
    pub engine: LegendType,
    pub pairs: BTreeMap<String, ScanOutcome>,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    pub generated_at: DateTime<Utc>,
}

/// EMA(9) fakeout signals across timeframes for one pair
#[derive(Debug, Clone, Serialize)]
pub struct Ema9Report {
    pub product_id: String,
    pub ema_period: usize,
    pub timeframes: BTreeMap<String, Vec<FakeoutSignal>>,
    pub total_signals: usize,
    pub generated_at: DateTime<Utc>,
}

pub struct MarketAnalyzer {
    coinbase: Arc<CoinbaseClient>,
    pantheon: Pantheon,
}

impl MarketAnalyzer {
    pub fn new(coinbase: Arc<CoinbaseClient>) -> Self {
        Self {
            coinbase,
            pantheon: Pantheon::create_default(),
        }
    }

    pub fn pantheon(&self) -> &Pantheon {
        &self.pantheon
    }

    /// Analyze one pair across several timeframes with the chosen engine
    pub async fn analyze_crypto_pair(
        &self,
        product_id: &str,
        legend_type: LegendType,
        timeframes: &[String],
        max_candles: usize,
    ) -> PantheonResult<PairAnalysis> {
        logger::info(
            LogTag::Analysis,
            &format!(
                "Analyzing {} with {} engine across {} timeframes",
                product_id,
                legend_type.as_str(),
                timeframes.len()
            ),
        );

        let mut results = BTreeMap::new();
        for timeframe in timeframes {
            let analysis = self
                .analyze_timeframe(product_id, legend_type, timeframe, max_candles)
                .await?;
            results.insert(timeframe.clone(), analysis);
        }

        Ok(PairAnalysis {
            product_id: product_id.to_string(),
            engine: legend_type,
            timeframes: results,
            generated_at: Utc::now(),
        })
    }

    /// Scan many pairs concurrently; failures are isolated per pair.
    ///
    /// In-flight requests are capped so a full-market scan cannot hammer
    /// Coinbase with hundreds of simultaneous calls.
    pub async fn scan_multiple_pairs(
        &self,
        product_ids: &[String],
        legend_type: LegendType,
        timeframe: &str,
        max_candles: usize,
    ) -> (BTreeMap<String, ScanOutcome>, ScanSummary) {
        let results: BTreeMap<String, ScanOutcome> = stream::iter(product_ids.iter().cloned())
            .map(|product_id| {
                async move {
                    let outcome = match self
                        .analyze_timeframe(&product_id, legend_type, timeframe, max_candles)
                        .await
                    {
                        Ok(analysis) => ScanOutcome::Report(analysis),
                        Err(e) => {
                            logger::warning(
                                LogTag::Analysis,
                                &format!("Scan failed for {}: {}", product_id, e),
                            );
                            ScanOutcome::Failed {
                                error: e.to_string(),
                            }
                        }
                    };
                    (product_id, outcome)
                }
            })
            .buffer_unordered(constants::MAX_CONCURRENT_SCANS)
            .collect()
            .await;

        let successful = results.values().filter(|o| o.is_success()).count();
        let total = product_ids.len();
        let summary = ScanSummary {
            total_pairs: total,
            successful_scans: successful,
            failed_scans: total - successful,
            success_rate: if total == 0 {
                0.0
            } else {
                successful as f64 / total as f64 * 100.0
            },
        };

        (results, summary)
    }

    /// Overview across the popular pairs (or all online products)
    pub async fn get_market_overview(
        &self,
        popular_only: bool,
        legend_type: LegendType,
    ) -> PantheonResult<MarketOverview> {
        let product_ids: Vec<String> = if popular_only {
            self.coinbase
                .popular_crypto_pairs()
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.coinbase
                .get_products()
                .await?
                .into_iter()
                .filter(|p| !p.trading_disabled)
                .map(|p| p.id)
                .collect()
        };

        let (pairs, _) = self
            .scan_multiple_pairs(
                &product_ids,
                legend_type,
                "1h",
                constants::DEFAULT_SCAN_MAX_CANDLES,
            )
            .await;

        let mut bullish = 0;
        let mut bearish = 0;
        let mut neutral = 0;
        for outcome in pairs.values() {
            if let ScanOutcome::Report(analysis) = outcome {
                match analysis.report.signal {
                    Signal::Bullish => bullish += 1,
                    Signal::Bearish => bearish += 1,
                    Signal::Neutral => neutral += 1,
                }
            }
        }

        Ok(MarketOverview {
            engine: legend_type,
            pairs,
            bullish,
            bearish,
            neutral,
            generated_at: Utc::now(),
        })
    }

    /// EMA(9) fakeout signals for one pair across the standard timeframes
    pub async fn get_ema9_fakeout_signals(
        &self,
        product_id: &str,
        max_candles: usize,
    ) -> PantheonResult<Ema9Report> {
        let mut timeframes = BTreeMap::new();
        let mut total_signals = 0;

        for timeframe in constants::EMA9_TIMEFRAMES {
            let candles = self
                .coinbase
                .get_product_candles(product_id, timeframe, max_candles)
                .await?;
            let signals = detect_fakeouts(&candles, constants::EMA_FAKEOUT_PERIOD);
            total_signals += signals.len();
            timeframes.insert(timeframe.to_string(), signals);
        }

        logger::debug(
            LogTag::Analysis,
            &format!(
                "EMA(9) fakeout scan for {}: {} signals",
                product_id, total_signals
            ),
        );

        Ok(Ema9Report {
            product_id: product_id.to_string(),
            ema_period: constants::EMA_FAKEOUT_PERIOD,
            timeframes,
            total_signals,
            generated_at: Utc::now(),
        })
    }

    async fn analyze_timeframe(
        &self,
        product_id: &str,
        legend_type: LegendType,
        timeframe: &str,
        max_candles: usize,
    ) -> PantheonResult<TimeframeAnalysis> {
        let candles = self
            .coinbase
            .get_product_candles(product_id, timeframe, max_candles)
            .await?;

        let engine = self.pantheon.engine_for(legend_type);
        let report = engine.evaluate(&candles);
        let last_close = candles.last().map(|c| c.close).unwrap_or(0.0);

        Ok(TimeframeAnalysis {
            timeframe: timeframe.to_string(),
            candle_count: candles.len(),
            last_close,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoinbaseConfig;

    // Serves candles for every pair except BAD-PAIR, which 404s
    async fn spawn_candle_server() -> String {
        use axum::{
            extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
        };

        let app = Router::new().route(
            "/products/:product_id/candles",
            get(|Path(product_id): Path<String>| async move {
                if product_id == "BAD-PAIR" {
                    return StatusCode::NOT_FOUND.into_response();
                }
                Json(serde_json::json!([
                    [1_700_000_300, 99.0, 101.0, 100.0, 100.5, 12.0],
                    [1_700_000_000, 98.0, 100.0, 99.0, 99.5, 8.0],
                ]))
                .into_response()
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn scan_isolates_failures_and_counts_outcomes() {
        let base_url = spawn_candle_server().await;
        let coinbase = CoinbaseClient::new(&CoinbaseConfig {
            base_url,
            request_timeout_secs: 5,
        })
        .unwrap();
        let analyzer = MarketAnalyzer::new(Arc::new(coinbase));

        let pairs: Vec<String> = ["BTC-USD", "BAD-PAIR", "ETH-USD"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (results, summary) = analyzer
            .scan_multiple_pairs(&pairs, LegendType::Scanner, "5m", 50)
            .await;

        assert_eq!(summary.total_pairs, 3);
        assert_eq!(summary.successful_scans, 2);
        assert_eq!(summary.failed_scans, 1);
        assert!(results["BTC-USD"].is_success());
        assert!(results["ETH-USD"].is_success());
        assert!(matches!(results["BAD-PAIR"], ScanOutcome::Failed { .. }));
    }
}
