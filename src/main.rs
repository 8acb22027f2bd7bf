use std::sync::Arc;

use pantheon_server::{
    analysis::MarketAnalyzer,
    cache::{self, CacheManager},
    coinbase::CoinbaseClient,
    config::Config,
    logger::{self, LogTag},
    webserver::{self, state::AppState},
};

const CONFIG_PATH: &str = "config.json";

/// Main entry point for the Pantheon server
///
/// Startup order matters: the cache credential is validated BEFORE any
/// network client is constructed, so a missing or placeholder password
/// aborts the process without ever touching the cache backend.
#[tokio::main]
async fn main() {
    logger::init();
    logger::print_header("Cryptocurrency Analysis API");

    let config = match Config::load(CONFIG_PATH) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            logger::error(LogTag::Config, &format!("❌ Failed to load config: {:#}", e));
            std::process::exit(1);
        }
    };

    let cache = if config.cache.enabled {
        match bootstrap_cache(&config).await {
            Ok(cache) => Some(cache),
            Err(exit_message) => {
                logger::error(LogTag::Cache, &exit_message);
                std::process::exit(1);
            }
        }
    } else {
        logger::warning(LogTag::Cache, "Cache disabled in config; running without it");
        None
    };

    let coinbase = match CoinbaseClient::new(&config.coinbase) {
        Ok(client) => {
            let client = match &cache {
                Some(cache) => client.with_cache(cache.clone(), config.cache.candle_ttl_secs),
                None => client,
            };
            Arc::new(client)
        }
        Err(e) => {
            logger::error(
                LogTag::Coinbase,
                &format!("❌ Failed to build Coinbase client: {}", e),
            );
            std::process::exit(1);
        }
    };

    let analyzer = Arc::new(MarketAnalyzer::new(Arc::clone(&coinbase)));
    let state = Arc::new(AppState::new(
        Arc::clone(&config),
        coinbase,
        analyzer,
        cache,
    ));

    if let Err(e) = ctrlc::set_handler(|| {
        webserver::server::shutdown();
    }) {
        logger::warning(
            LogTag::System,
            &format!("Failed to install Ctrl-C handler: {}", e),
        );
    }

    logger::info(LogTag::System, "🚀 Pantheon server starting up...");

    match webserver::server::start_server(state).await {
        Ok(()) => {
            logger::info(LogTag::System, "✅ Pantheon server stopped");
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ Pantheon server failed: {}", e));
            std::process::exit(1);
        }
    }
}

/// Run the secure cache bootstrap and connect to Redis.
///
/// Both credential failures and an unreachable backend are fatal here:
/// a secured cache that cannot be used safely must stop the process
/// rather than silently running unsecured.
async fn bootstrap_cache(config: &Config) -> Result<CacheManager, String> {
    let credential = cache::bootstrap_credential(&config.cache.password_env)
        .map_err(|e| format!("❌ Secure cache bootstrap failed: {}", e))?;

    logger::info(
        LogTag::Cache,
        &format!(
            "🔐 Cache credential accepted from {}",
            credential.source()
        ),
    );

    CacheManager::connect(&config.cache, &credential)
        .await
        .map_err(|e| format!("❌ Cache connection failed: {}", e))
}
