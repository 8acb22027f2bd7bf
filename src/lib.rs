pub mod analysis;
pub mod cache;
pub mod coinbase;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logger;
pub mod webserver;
