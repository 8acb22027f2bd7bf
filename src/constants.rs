/// Shared constants for the Pantheon server

/// Environment variable holding the Redis password for the secured cache.
/// Absence or a placeholder value is a fatal startup condition.
pub const REDIS_PASSWORD_ENV: &str = "PANTHEON_REDIS_PASSWORD";

/// Coinbase Exchange REST API base URL
pub const COINBASE_BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Coinbase returns at most 300 candles per request
pub const COINBASE_MAX_CANDLES: usize = 300;

/// Curated list of high-volume trading pairs used by /products and /overview
pub const POPULAR_CRYPTO_PAIRS: &[&str] = &[
    "BTC-USD", "ETH-USD", "SOL-USD", "XRP-USD", "ADA-USD", "DOGE-USD",
    "AVAX-USD", "LINK-USD", "DOT-USD", "LTC-USD",
];

/// Timeframes analyzed by default in /analyze
pub const DEFAULT_ANALYSIS_TIMEFRAMES: &[&str] = &["5m", "15m", "1h"];

/// Timeframes scanned by the EMA(9) fakeout detector
pub const EMA9_TIMEFRAMES: &[&str] = &["5m", "15m", "1h"];

/// EMA period for the fakeout detector
pub const EMA_FAKEOUT_PERIOD: usize = 9;

/// Default candle limits for /analyze and /scan
pub const DEFAULT_ANALYZE_MAX_CANDLES: usize = 200;
pub const DEFAULT_SCAN_MAX_CANDLES: usize = 100;

/// Upper bound on in-flight Coinbase requests during multi-pair scans
pub const MAX_CONCURRENT_SCANS: usize = 8;

/// Default cache TTL for candle data, in seconds
pub const DEFAULT_CANDLE_CACHE_TTL_SECS: u64 = 300;

/// Webserver defaults (overridable via config and HOST/PORT env vars)
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
