//! Legend analysis engines
//!
//! The `Pantheon` registry owns the available engines. Each engine turns a
//! candle series into an `EngineReport` with a signal and confidence score.

use serde::{Deserialize, Serialize};

use crate::coinbase::Candle;

pub mod analyzer;
pub mod ema9;
pub mod engines;

pub use analyzer::MarketAnalyzer;

/// Which engine family a request wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegendType {
    #[default]
    Traditional,
    Scanner,
}

impl LegendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendType::Traditional => "traditional",
            LegendType::Scanner => "scanner",
        }
    }
}

/// Direction an engine reads from the market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

/// Result of one engine evaluating one candle series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineReport {
    pub engine: String,
    pub signal: Signal,
    /// 0.0..=1.0
    pub confidence: f64,
    pub metrics: serde_json::Value,
}

/// An analysis engine operating on a candle series
pub trait LegendEngine: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn evaluate(&self, candles: &[Candle]) -> EngineReport;
}

/// Registry of available engines
pub struct Pantheon {
    traditional: engines::TraditionalEngine,
    scanner: engines::ScannerEngine,
}

impl Pantheon {
    pub fn create_default() -> Self {
        Self {
            traditional: engines::TraditionalEngine,
            scanner: engines::ScannerEngine,
        }
    }

    pub fn available_engines(&self) -> Vec<&'static str> {
        vec![self.traditional.name(), self.scanner.name()]
    }

    pub fn engine_descriptions(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            (self.traditional.name(), self.traditional.description()),
            (self.scanner.name(), self.scanner.description()),
        ]
    }

    pub fn engine_for(&self, legend_type: LegendType) -> &dyn LegendEngine {
        match legend_type {
            LegendType::Traditional => &self.traditional,
            LegendType::Scanner => &self.scanner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LegendType::Traditional).unwrap(),
            "\"traditional\""
        );
        let parsed: LegendType = serde_json::from_str("\"scanner\"").unwrap();
        assert_eq!(parsed, LegendType::Scanner);
    }

    #[test]
    fn default_registry_lists_both_engines() {
        let pantheon = Pantheon::create_default();
        let engines = pantheon.available_engines();
        assert_eq!(engines, vec!["traditional", "scanner"]);
    }

    #[test]
    fn engine_for_matches_legend_type() {
        let pantheon = Pantheon::create_default();
        assert_eq!(
            pantheon.engine_for(LegendType::Scanner).name(),
            "scanner"
        );
    }
}
