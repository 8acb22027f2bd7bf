/// Logger configuration with per-module debug gating
///
/// Parsed once from process arguments at startup. `--debug-<module>` enables
/// Debug output for one tag, `--verbose` enables everything, `--quiet`
/// raises the threshold to warnings.
use std::collections::HashSet;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use super::levels::LogLevel;
use super::tags::LogTag;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub debug_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Parse command-line arguments into the global logger configuration
pub fn init_from_args() {
    let mut config = LoggerConfig::default();

    for arg in std::env::args() {
        if arg == "--verbose" {
            config.min_level = LogLevel::Verbose;
        } else if arg == "--quiet" {
            config.min_level = LogLevel::Warning;
        } else if let Some(module) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(module.to_string());
        }
    }

    set_logger_config(config);
}

/// Get a snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().unwrap().clone()
}

/// Replace the global logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write().unwrap() = config;
}

/// Check if debug output is enabled for a tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = LOGGER_CONFIG.read().unwrap();
    config.min_level >= LogLevel::Debug || config.debug_tags.contains(tag.to_debug_key())
}
