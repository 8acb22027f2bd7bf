/// Typed views of Coinbase Exchange REST responses
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A trading pair as returned by GET /products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub base_currency: String,
    pub quote_currency: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub trading_disabled: bool,
}

/// Current ticker for a pair, GET /products/{id}/ticker
///
/// Coinbase returns numeric fields as strings; they are passed through
/// unchanged so no precision is lost in the API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(default)]
    pub trade_id: i64,
    pub price: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub bid: String,
    #[serde(default)]
    pub ask: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub time: String,
}

/// One OHLCV candle.
///
/// The wire format is a positional array `[time, low, high, open, close,
/// volume]` with the epoch timestamp first; serialization back out uses
/// named fields for readable API responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub volume: f64,
}

impl<'de> Deserialize<'de> for Candle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (time, low, high, open, close, volume): (i64, f64, f64, f64, f64, f64) =
            Deserialize::deserialize(deserializer)?;

        let time = DateTime::from_timestamp(time, 0)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid candle timestamp: {}", time)))?;

        Ok(Candle {
            time,
            low,
            high,
            open,
            close,
            volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candle_decodes_positional_array() {
        let json = "[1700000000, 35000.1, 35500.9, 35100.0, 35450.5, 123.45]";
        let candle: Candle = serde_json::from_str(json).unwrap();

        assert_eq!(candle.time.timestamp(), 1_700_000_000);
        assert_eq!(candle.low, 35000.1);
        assert_eq!(candle.high, 35500.9);
        assert_eq!(candle.open, 35100.0);
        assert_eq!(candle.close, 35450.5);
        assert_eq!(candle.volume, 123.45);
    }

    #[test]
    fn candle_serializes_with_named_fields() {
        let candle: Candle =
            serde_json::from_str("[1700000000, 1.0, 2.0, 1.5, 1.8, 10.0]").unwrap();
        let value = serde_json::to_value(candle).unwrap();

        assert!(value.get("close").is_some());
        assert_eq!(value["volume"], 10.0);
    }

    #[test]
    fn candle_rejects_invalid_timestamp() {
        let json = "[99999999999999999, 1.0, 2.0, 1.5, 1.8, 10.0]";
        assert!(serde_json::from_str::<Candle>(json).is_err());
    }

    #[test]
    fn ticker_tolerates_missing_optional_fields() {
        let ticker: Ticker = serde_json::from_str(r#"{"price": "35450.5"}"#).unwrap();
        assert_eq!(ticker.price, "35450.5");
        assert!(ticker.bid.is_empty());
    }
}
