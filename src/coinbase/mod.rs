//! Coinbase Exchange REST client
//!
//! Public-data endpoints only (products, ticker, candles); no API keys are
//! required. Candle fetches go through the Redis cache when one is attached,
//! and degrade to direct fetches when the cache misbehaves.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::CacheManager;
use crate::config::CoinbaseConfig;
use crate::constants;
use crate::errors::{DataError, NetworkError, PantheonError, PantheonResult};
use crate::logger::{self, LogTag};

pub mod types;

pub use types::{Candle, Product, Ticker};

// Seam between the client and the cache backend so candle fetches can be
// exercised against a misbehaving cache without a live Redis.
#[derive(Clone)]
enum CandleCache {
    Redis(CacheManager),
    #[cfg(test)]
    AlwaysFailing,
}

impl CandleCache {
    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> PantheonResult<Option<T>> {
        match self {
            CandleCache::Redis(cache) => cache.get_json(key).await,
            #[cfg(test)]
            CandleCache::AlwaysFailing => Err(PantheonError::cache_connection("cache offline")),
        }
    }

    async fn store_json<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        ttl_secs: u64,
    ) -> PantheonResult<()> {
        match self {
            CandleCache::Redis(cache) => cache.store_json(key, data, ttl_secs).await,
            #[cfg(test)]
            CandleCache::AlwaysFailing => Err(PantheonError::cache_connection("cache offline")),
        }
    }
}

#[derive(Clone)]
pub struct CoinbaseClient {
    http: reqwest::Client,
    base_url: String,
    cache: Option<CandleCache>,
    candle_ttl_secs: u64,
}

impl CoinbaseClient {
    pub fn new(config: &CoinbaseConfig) -> PantheonResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("pantheon-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PantheonError::network_error(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: None,
            candle_ttl_secs: constants::DEFAULT_CANDLE_CACHE_TTL_SECS,
        })
    }

    /// Attach a cache manager for candle data
    pub fn with_cache(mut self, cache: CacheManager, candle_ttl_secs: u64) -> Self {
        self.cache = Some(CandleCache::Redis(cache));
        self.candle_ttl_secs = candle_ttl_secs;
        self
    }

    #[cfg(test)]
    fn with_failing_cache(mut self) -> Self {
        self.cache = Some(CandleCache::AlwaysFailing);
        self
    }

    /// GET /products — all trading pairs
    pub async fn get_products(&self) -> PantheonResult<Vec<Product>> {
        self.get_json("/products").await
    }

    /// GET /products/{id}/ticker — current ticker for one pair
    pub async fn get_product_ticker(&self, product_id: &str) -> PantheonResult<Ticker> {
        self.get_json(&format!("/products/{}/ticker", product_id))
            .await
    }

    /// Fetch candles for a pair, oldest first, at most `max_candles`.
    ///
    /// `timeframe` is a label like "5m" or a raw granularity in seconds.
    pub async fn get_product_candles(
        &self,
        product_id: &str,
        timeframe: &str,
        max_candles: usize,
    ) -> PantheonResult<Vec<Candle>> {
        let granularity = parse_timeframe(timeframe)?;
        let cache_key = format!("candles:{}:{}", product_id, granularity);

        if let Some(cache) = &self.cache {
            match cache.get_json::<Vec<Candle>>(&cache_key).await {
                Ok(Some(candles)) => {
                    logger::debug(
                        LogTag::Coinbase,
                        &format!("Cache hit for {} ({} candles)", cache_key, candles.len()),
                    );
                    return Ok(truncate_latest(candles, max_candles));
                }
                Ok(None) => {}
                Err(e) => {
                    // A flaky cache must not take down market data
                    logger::warning(
                        LogTag::Cache,
                        &format!("Cache read failed for {}: {}", cache_key, e),
                    );
                }
            }
        }

        let path = format!(
            "/products/{}/candles?granularity={}",
            product_id, granularity
        );
        let mut candles: Vec<Candle> = self.get_json(&path).await?;

        // Coinbase returns newest first
        candles.sort_by_key(|c| c.time);

        if let Some(cache) = &self.cache {
            if let Err(e) = cache
                .store_json(&cache_key, &candles, self.candle_ttl_secs)
                .await
            {
                logger::warning(
                    LogTag::Cache,
                    &format!("Cache write failed for {}: {}", cache_key, e),
                );
            }
        }

        Ok(truncate_latest(candles, max_candles))
    }

    /// Curated high-volume pairs
    pub fn popular_crypto_pairs(&self) -> &'static [&'static str] {
        constants::POPULAR_CRYPTO_PAIRS
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PantheonResult<T> {
        let url = format!("{}{}", self.base_url, path);
        logger::debug(LogTag::Coinbase, &format!("GET {}", url));

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.ok();
            return Err(PantheonError::Network(NetworkError::HttpStatusError {
                endpoint: url,
                status: status.as_u16(),
                body,
            }));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Map a timeframe label to a Coinbase granularity in seconds
pub fn parse_timeframe(timeframe: &str) -> PantheonResult<u32> {
    let granularity = match timeframe {
        "1m" => 60,
        "5m" => 300,
        "15m" => 900,
        "1h" => 3600,
        "6h" => 21600,
        "1d" => 86400,
        other => match other.parse::<u32>() {
            // Coinbase only serves these granularities
            Ok(n @ (60 | 300 | 900 | 3600 | 21600 | 86400)) => n,
            _ => {
                return Err(PantheonError::Data(DataError::UnknownTimeframe {
                    value: timeframe.to_string(),
                }))
            }
        },
    };

    Ok(granularity)
}

// Keep the most recent `max` candles, preserving oldest-first order
fn truncate_latest(candles: Vec<Candle>, max: usize) -> Vec<Candle> {
    if candles.len() <= max {
        return candles;
    }
    let skip = candles.len() - max;
    candles.into_iter().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_labels_map_to_granularities() {
        assert_eq!(parse_timeframe("1m").unwrap(), 60);
        assert_eq!(parse_timeframe("5m").unwrap(), 300);
        assert_eq!(parse_timeframe("15m").unwrap(), 900);
        assert_eq!(parse_timeframe("1h").unwrap(), 3600);
        assert_eq!(parse_timeframe("6h").unwrap(), 21600);
        assert_eq!(parse_timeframe("1d").unwrap(), 86400);
    }

    #[test]
    fn raw_granularity_strings_are_accepted() {
        assert_eq!(parse_timeframe("300").unwrap(), 300);
        assert_eq!(parse_timeframe("86400").unwrap(), 86400);
    }

    #[test]
    fn unsupported_timeframes_are_rejected() {
        assert!(parse_timeframe("2h").is_err());
        assert!(parse_timeframe("301").is_err());
        assert!(parse_timeframe("").is_err());
    }

    // Serves a fixed candle payload (newest first, as Coinbase does) on an
    // ephemeral local port
    async fn spawn_candle_server() -> String {
        use axum::{routing::get, Json, Router};

        let app = Router::new().route(
            "/products/:product_id/candles",
            get(|| async {
                Json(serde_json::json!([
                    [1_700_000_300, 99.0, 101.0, 100.0, 100.5, 12.0],
                    [1_700_000_000, 98.0, 100.0, 99.0, 99.5, 8.0],
                ]))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn candles_survive_a_failing_cache() {
        let base_url = spawn_candle_server().await;
        let config = CoinbaseConfig {
            base_url,
            request_timeout_secs: 5,
        };

        // Both the cache read and the post-fetch write fail; the fetch must
        // still produce candles, sorted oldest first.
        let client = CoinbaseClient::new(&config).unwrap().with_failing_cache();
        let candles = client
            .get_product_candles("BTC-USD", "5m", 10)
            .await
            .unwrap();

        assert_eq!(candles.len(), 2);
        assert!(candles[0].time < candles[1].time);
        assert_eq!(candles[1].close, 100.5);
    }

    #[test]
    fn truncate_keeps_latest_candles() {
        let candles: Vec<Candle> = (0..5)
            .map(|i| {
                serde_json::from_str(&format!(
                    "[{}, 1.0, 2.0, 1.5, {}.0, 10.0]",
                    1_700_000_000 + i * 300,
                    i
                ))
                .unwrap()
            })
            .collect();

        let kept = truncate_latest(candles, 2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].close, 3.0);
        assert_eq!(kept[1].close, 4.0);
    }
}
