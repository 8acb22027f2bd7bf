//! HTTP API exposing market analysis and Coinbase market data

pub mod routes;
pub mod server;
pub mod state;
pub mod utils;
