use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

use crate::config::CacheSettings;
use crate::errors::{CacheError, PantheonError, PantheonResult};
use crate::logger::{self, LogTag};

pub mod credential;

pub use credential::{bootstrap_credential, CacheCredential};

/// Redis-backed cache manager for market data
///
/// Only constructed with a credential that passed the secure bootstrap. Errors
/// raised while building or opening the connection name only the host and
/// port, never the connection URL, so the password cannot leak through them.
#[derive(Clone)]
pub struct CacheManager {
    conn: MultiplexedConnection,
    key_prefix: String,
}

/// Build the Redis client for a validated credential.
///
/// The underlying parse error is dropped on purpose: redis echoes the URL it
/// failed to parse, and ours carries the password.
fn open_client(
    settings: &CacheSettings,
    credential: &CacheCredential,
) -> PantheonResult<redis::Client> {
    let url = format!(
        "redis://:{}@{}:{}/",
        credential.expose(),
        settings.host,
        settings.port
    );

    redis::Client::open(url).map_err(|_| {
        PantheonError::cache_connection(format!(
            "invalid cache address {}:{}",
            settings.host, settings.port
        ))
    })
}

impl CacheManager {
    /// Connect to the cache backend
    pub async fn connect(
        settings: &CacheSettings,
        credential: &CacheCredential,
    ) -> PantheonResult<Self> {
        let client = open_client(settings, credential)?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                PantheonError::cache_connection(format!(
                    "failed to connect to {}:{}: {}",
                    settings.host, settings.port, e
                ))
            })?;

        let cache = Self {
            conn,
            key_prefix: settings.key_prefix.clone(),
        };

        cache.ping().await?;
        logger::info(
            LogTag::Cache,
            &format!(
                "✅ Cache connected to {}:{} (credential from {})",
                settings.host,
                settings.port,
                credential.source()
            ),
        );

        Ok(cache)
    }

    /// Health probe
    pub async fn ping(&self) -> PantheonResult<()> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        if reply != "PONG" {
            return Err(PantheonError::Cache(CacheError::Backend {
                message: format!("unexpected PING reply: {}", reply),
            }));
        }
        Ok(())
    }

    /// Store a serializable value under a namespaced key with a TTL
    pub async fn store_json<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        ttl_secs: u64,
    ) -> PantheonResult<()> {
        let json_data = serde_json::to_string(data)?;
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(self.namespaced(key), json_data, ttl_secs).await?;
        Ok(())
    }

    /// Retrieve a cached value, treating expiry and misses as None
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> PantheonResult<Option<T>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(self.namespaced(key)).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::credential::validate_credential;

    fn settings(host: &str) -> CacheSettings {
        CacheSettings {
            enabled: true,
            host: host.to_string(),
            port: 6379,
            password_env: "PANTHEON_REDIS_PASSWORD".to_string(),
            key_prefix: "pantheon".to_string(),
            candle_ttl_secs: 300,
        }
    }

    #[test]
    fn open_client_accepts_validated_credential() {
        let credential =
            validate_credential("PANTHEON_REDIS_PASSWORD", Some("Cx9z-qLm7")).unwrap();
        assert!(open_client(&settings("127.0.0.1"), &credential).is_ok());
    }

    #[test]
    fn open_client_errors_never_echo_the_secret() {
        let secret = "ultra-secret-h7Kq";
        let credential = validate_credential("PANTHEON_REDIS_PASSWORD", Some(secret)).unwrap();

        // A host that cannot appear in a URL forces the parse failure path
        let err = open_client(&settings("not a host"), &credential).unwrap_err();

        let rendered = format!("{} / {:?}", err, err);
        assert!(!rendered.contains(secret), "secret leaked: {}", rendered);
        assert!(rendered.contains("not a host"));
    }
}
