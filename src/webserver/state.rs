/// Shared application state for the webserver
///
/// Holds the market analyzer, the Coinbase client, and the loaded
/// configuration; route handlers receive it via axum state extraction.
use std::sync::Arc;

use crate::analysis::MarketAnalyzer;
use crate::cache::CacheManager;
use crate::coinbase::CoinbaseClient;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub coinbase: Arc<CoinbaseClient>,
    pub analyzer: Arc<MarketAnalyzer>,
    pub cache: Option<CacheManager>,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        coinbase: Arc<CoinbaseClient>,
        analyzer: Arc<MarketAnalyzer>,
        cache: Option<CacheManager>,
    ) -> Self {
        Self {
            config,
            coinbase,
            analyzer,
            cache,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
