//! Structured logging for the Pantheon server
//!
//! Tagged, leveled console logging with per-module debug control:
//!
//! ```rust
//! use pantheon_server::logger::{self, LogTag};
//!
//! logger::error(LogTag::Coinbase, "Connection failed");
//! logger::info(LogTag::Webserver, "Listening on 127.0.0.1:8000");
//! logger::debug(LogTag::Cache, "Cache hit for BTC-USD"); // Only with --debug-cache
//! ```
//!
//! Call `logger::init()` once at startup, before any logging occurs. It
//! scans the command line for `--debug-<module>`, `--verbose` and `--quiet`
//! flags and configures filtering accordingly.

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use format::print_header;
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system from command-line arguments
pub fn init() {
    config::init_from_args();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (only with --debug-<module> for this tag)
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
