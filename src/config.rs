use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub coinbase: CoinbaseConfig,
    pub cache: CacheSettings,
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinbaseConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    /// Environment variable the bootstrap reads the password from
    pub password_env: String,
    pub key_prefix: String,
    pub candle_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: constants::DEFAULT_HOST.to_string(),
                port: constants::DEFAULT_PORT,
            },
            coinbase: CoinbaseConfig {
                base_url: constants::COINBASE_BASE_URL.to_string(),
                request_timeout_secs: 10,
            },
            cache: CacheSettings {
                enabled: true,
                host: "127.0.0.1".to_string(),
                port: 6379,
                password_env: constants::REDIS_PASSWORD_ENV.to_string(),
                key_prefix: "pantheon".to_string(),
                candle_ttl_secs: constants::DEFAULT_CANDLE_CACHE_TTL_SECS,
            },
            general: GeneralConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, creating a default one if missing.
    ///
    /// `HOST` and `PORT` environment variables override the file values.
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;

            serde_json::from_str::<Self>(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        } else {
            let default_config = Self::default();
            default_config.save(path)?;
            default_config
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("HOST") {
            if !host.is_empty() {
                self.server.host = host;
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            if !port.is_empty() {
                self.server.port = port
                    .parse()
                    .with_context(|| format!("Invalid PORT value: {}", port))?;
            }
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("server.port must be non-zero"));
        }

        if self.cache.enabled && self.cache.password_env.is_empty() {
            return Err(anyhow::anyhow!(
                "cache.password_env is required when the cache is enabled"
            ));
        }

        if !self.coinbase.base_url.starts_with("http") {
            return Err(anyhow::anyhow!(
                "coinbase.base_url must be an http(s) URL: {}",
                self.coinbase.base_url
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.cache.password_env, "PANTHEON_REDIS_PASSWORD");
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.host, config.server.host);
        assert_eq!(parsed.cache.key_prefix, "pantheon");
    }

    #[test]
    fn empty_password_env_is_rejected_when_cache_enabled() {
        let mut config = Config::default();
        config.cache.password_env = String::new();
        assert!(config.validate().is_err());
    }
}
