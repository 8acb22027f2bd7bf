//! EMA(9) fakeout detection
//!
//! A fakeout is a candle that pierces the EMA(9) intrabar but closes back on
//! the side it came from: a failed breakout (high crosses above, close stays
//! below) or a failed breakdown (low crosses below, close stays above).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engines::ema;
use crate::coinbase::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FakeoutDirection {
    /// Price poked above the EMA and was rejected (bearish)
    FailedBreakout,
    /// Price poked below the EMA and recovered (bullish)
    FailedBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeoutSignal {
    pub time: DateTime<Utc>,
    pub direction: FakeoutDirection,
    pub ema: f64,
    pub close: f64,
    /// How far past the EMA the wick reached, as a fraction of the EMA
    pub pierce_pct: f64,
}

/// Scan a candle series for EMA fakeouts.
///
/// The candle that crosses must start from a close on the rejecting side,
/// so sustained trends riding the EMA do not register as signals.
pub fn detect_fakeouts(candles: &[Candle], period: usize) -> Vec<FakeoutSignal> {
    if candles.len() < period + 2 {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let ema_series = ema(&closes, period);

    let mut signals = Vec::new();

    // Skip the warmup region where the EMA is still seeding
    for i in period.max(1)..candles.len() {
        let candle = &candles[i];
        let ema_value = ema_series[i];
        let prev_below = closes[i - 1] < ema_series[i - 1];

        if prev_below && candle.high > ema_value && candle.close < ema_value {
            signals.push(FakeoutSignal {
                time: candle.time,
                direction: FakeoutDirection::FailedBreakout,
                ema: ema_value,
                close: candle.close,
                pierce_pct: (candle.high - ema_value) / ema_value * 100.0,
            });
        } else if !prev_below && candle.low < ema_value && candle.close > ema_value {
            signals.push(FakeoutSignal {
                time: candle.time,
                direction: FakeoutDirection::FailedBreakdown,
                ema: ema_value,
                close: candle.close,
                pierce_pct: (ema_value - candle.low) / ema_value * 100.0,
            });
        }
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(ts: i64, low: f64, high: f64, open: f64, close: f64) -> Candle {
        serde_json::from_str(&format!(
            "[{}, {}, {}, {}, {}, 10.0]",
            ts, low, high, open, close
        ))
        .unwrap()
    }

    fn flat_series(n: usize, price: f64) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                candle(
                    1_700_000_000 + i as i64 * 300,
                    price - 0.1,
                    price + 0.1,
                    price,
                    price,
                )
            })
            .collect()
    }

    #[test]
    fn no_signals_on_flat_series() {
        let candles = flat_series(30, 100.0);
        assert!(detect_fakeouts(&candles, 9).is_empty());
    }

    #[test]
    fn no_signals_with_too_few_candles() {
        let candles = flat_series(5, 100.0);
        assert!(detect_fakeouts(&candles, 9).is_empty());
    }

    #[test]
    fn detects_failed_breakout() {
        // A gentle downtrend keeps closes under the lagging EMA, then one
        // candle spikes above it and closes back under.
        let mut candles: Vec<Candle> = (0..20)
            .map(|i| {
                let close = 100.0 - 0.1 * i as f64;
                candle(
                    1_700_000_000 + i as i64 * 300,
                    close - 0.05,
                    close + 0.05,
                    close,
                    close,
                )
            })
            .collect();
        candles.push(candle(1_700_006_000, 97.9, 101.5, 98.1, 98.0));

        let signals = detect_fakeouts(&candles, 9);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].direction, FakeoutDirection::FailedBreakout);
        assert!(signals[0].pierce_pct > 0.0);
    }

    #[test]
    fn detects_failed_breakdown() {
        // Uptrend with closes above the EMA, then a flush below that recovers
        let mut candles: Vec<Candle> = (0..20)
            .map(|i| {
                let close = 100.0 + 0.1 * i as f64;
                candle(
                    1_700_000_000 + i as i64 * 300,
                    close - 0.05,
                    close + 0.05,
                    close,
                    close,
                )
            })
            .collect();
        candles.push(candle(1_700_006_000, 98.5, 102.1, 101.9, 102.0));

        let signals = detect_fakeouts(&candles, 9);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].direction, FakeoutDirection::FailedBreakdown);
    }
}
