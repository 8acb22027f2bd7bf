/// Axum webserver implementation
///
/// Main server lifecycle management including startup, shutdown, and
/// graceful termination
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::{
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// This function blocks until the server is shut down
pub async fn start_server(state: Arc<AppState>) -> Result<(), String> {
    let host = state.config.server.host.clone();
    let port = state.config.server.port;

    logger::debug(
        LogTag::Webserver,
        &format!("🌐 Starting webserver on {}:{}", host, port),
    );

    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address {}:{}: {}", host, port, e))?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                format!(
                    "Failed to bind to {}: Address already in use\n\
                     \n\
                     This usually means another instance of pantheon-server is running.\n\
                     Check with: ps aux | grep pantheon-server | grep -v grep",
                    addr
                )
            }
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Failed to bind to {}: Permission denied\n\
                     \n\
                     Port {} requires elevated privileges on this system.\n\
                     Consider using a port above 1024 or running with appropriate permissions.",
                    addr, port
                )
            }
            _ => format!("Failed to bind to {}: {}", addr, e),
        }
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("✅ Webserver listening on http://{}", addr),
    );

    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::info(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "✅ Webserver stopped gracefully");

    Ok(())
}

/// Trigger webserver shutdown
pub fn shutdown() {
    SHUTDOWN_NOTIFY.notify_one();
}

/// Build the Axum application with all routes and middleware
///
/// CORS is wide open: the API serves public market data to browser
/// dashboards on arbitrary origins.
fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MarketAnalyzer;
    use crate::coinbase::CoinbaseClient;
    use crate::config::Config;

    #[tokio::test]
    async fn responses_carry_permissive_cors_headers() {
        let config = Arc::new(Config::default());
        let coinbase = Arc::new(CoinbaseClient::new(&config.coinbase).unwrap());
        let analyzer = Arc::new(MarketAnalyzer::new(coinbase.clone()));
        let state = Arc::new(AppState::new(config, coinbase, analyzer, None));

        let app = build_app(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let response = reqwest::Client::new()
            .get(format!("http://{}/", addr))
            .header("Origin", "http://localhost:3000")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
