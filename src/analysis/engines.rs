//! Built-in legend engines and the indicator math they share

use serde_json::json;

use super::{EngineReport, LegendEngine, Signal};
use crate::coinbase::Candle;

/// Classic technical analysis: SMA(20)/EMA(9) trend, RSI(14), volume trend
pub struct TraditionalEngine;

/// Pattern scanner: range compression followed by momentum expansion
pub struct ScannerEngine;

const SMA_PERIOD: usize = 20;
const EMA_PERIOD: usize = 9;
const RSI_PERIOD: usize = 14;

impl LegendEngine for TraditionalEngine {
    fn name(&self) -> &'static str {
        "traditional"
    }

    fn description(&self) -> &'static str {
        "Classic technical analysis with traditional indicators"
    }

    fn evaluate(&self, candles: &[Candle]) -> EngineReport {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        if closes.len() < SMA_PERIOD {
            return EngineReport {
                engine: self.name().to_string(),
                signal: Signal::Neutral,
                confidence: 0.0,
                metrics: json!({ "reason": "insufficient candles", "candles": closes.len() }),
            };
        }

        let last_close = *closes.last().unwrap();
        let sma_20 = sma(&closes, SMA_PERIOD).unwrap();
        let ema_9 = *ema(&closes, EMA_PERIOD).last().unwrap();
        let rsi_14 = rsi(&closes, RSI_PERIOD);
        let volume_trend = volume_trend(candles);

        // Score each indicator -1..=1, then average
        let mut score: f64 = 0.0;
        if last_close > sma_20 {
            score += 1.0;
        } else {
            score -= 1.0;
        }
        if last_close > ema_9 {
            score += 1.0;
        } else {
            score -= 1.0;
        }
        if let Some(rsi_value) = rsi_14 {
            if rsi_value > 70.0 {
                score -= 1.0; // overbought
            } else if rsi_value < 30.0 {
                score += 1.0; // oversold, mean-reversion bias
            }
        }
        score /= 3.0;

        let signal = if score > 0.2 {
            Signal::Bullish
        } else if score < -0.2 {
            Signal::Bearish
        } else {
            Signal::Neutral
        };

        EngineReport {
            engine: self.name().to_string(),
            signal,
            confidence: score.abs().min(1.0),
            metrics: json!({
                "last_close": last_close,
                "sma_20": sma_20,
                "ema_9": ema_9,
                "rsi_14": rsi_14,
                "volume_trend": volume_trend,
            }),
        }
    }
}

impl LegendEngine for ScannerEngine {
    fn name(&self) -> &'static str {
        "scanner"
    }

    fn description(&self) -> &'static str {
        "Advanced scanning engine for pattern detection"
    }

    fn evaluate(&self, candles: &[Candle]) -> EngineReport {
        if candles.len() < 20 {
            return EngineReport {
                engine: self.name().to_string(),
                signal: Signal::Neutral,
                confidence: 0.0,
                metrics: json!({ "reason": "insufficient candles", "candles": candles.len() }),
            };
        }

        // Compare the trading range of the older window to the recent one:
        // compression then expansion marks a breakout setup.
        let split = candles.len() - 10;
        let older = &candles[..split];
        let recent = &candles[split..];

        let older_range = average_range(older);
        let recent_range = average_range(recent);
        let expansion = if older_range > 0.0 {
            recent_range / older_range
        } else {
            1.0
        };

        let momentum = momentum(candles, 10);

        let signal = if expansion > 1.5 && momentum > 0.0 {
            Signal::Bullish
        } else if expansion > 1.5 && momentum < 0.0 {
            Signal::Bearish
        } else {
            Signal::Neutral
        };

        let confidence = if signal == Signal::Neutral {
            0.0
        } else {
            ((expansion - 1.5) / 1.5).clamp(0.0, 1.0)
        };

        EngineReport {
            engine: self.name().to_string(),
            signal,
            confidence,
            metrics: json!({
                "range_expansion": expansion,
                "momentum_pct": momentum * 100.0,
                "older_avg_range": older_range,
                "recent_avg_range": recent_range,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Indicator math
// ---------------------------------------------------------------------------

/// Simple moving average of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if values.len() < period || period == 0 {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average series, seeded with the first value
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = values[0];
    out.push(current);

    for &value in &values[1..] {
        current = alpha * value + (1.0 - alpha) * current;
        out.push(current);
    }

    out
}

/// Wilder RSI over the last `period` deltas
pub fn rsi(values: &[f64], period: usize) -> Option<f64> {
    if values.len() < period + 1 {
        return None;
    }

    let deltas: Vec<f64> = values
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .collect();
    let recent = &deltas[deltas.len() - period..];

    let gains: f64 = recent.iter().filter(|d| **d > 0.0).sum();
    let losses: f64 = -recent.iter().filter(|d| **d < 0.0).sum::<f64>();

    if losses == 0.0 {
        return Some(100.0);
    }

    let rs = gains / losses;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Fractional price change over the last `period` candles
pub fn momentum(candles: &[Candle], period: usize) -> f64 {
    if candles.len() < period + 1 {
        return 0.0;
    }
    let start = candles[candles.len() - 1 - period].close;
    let end = candles[candles.len() - 1].close;
    if start == 0.0 {
        return 0.0;
    }
    (end - start) / start
}

fn average_range(candles: &[Candle]) -> f64 {
    if candles.is_empty() {
        return 0.0;
    }
    candles.iter().map(|c| c.high - c.low).sum::<f64>() / candles.len() as f64
}

fn volume_trend(candles: &[Candle]) -> f64 {
    if candles.len() < 10 {
        return 0.0;
    }
    let split = candles.len() - 5;
    let older: f64 = candles[split.saturating_sub(5)..split]
        .iter()
        .map(|c| c.volume)
        .sum::<f64>()
        / 5.0;
    let recent: f64 = candles[split..].iter().map(|c| c.volume).sum::<f64>() / 5.0;
    if older == 0.0 {
        return 0.0;
    }
    recent / older - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(close: f64) -> Candle {
        candle_full(close, close - 0.5, close + 0.5, close, 10.0)
    }

    fn candle_full(open: f64, low: f64, high: f64, close: f64, volume: f64) -> Candle {
        serde_json::from_str(&format!(
            "[1700000000, {}, {}, {}, {}, {}]",
            low, high, open, close, volume
        ))
        .unwrap()
    }

    #[test]
    fn sma_averages_last_window() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sma(&values, 2), Some(4.5));
        assert_eq!(sma(&values, 5), Some(3.0));
        assert_eq!(sma(&values, 6), None);
    }

    #[test]
    fn ema_converges_toward_constant_input() {
        let values = vec![10.0; 50];
        let series = ema(&values, 9);
        assert_eq!(series.len(), 50);
        assert!((series.last().unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_is_100_for_monotonic_gains() {
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert_eq!(rsi(&values, 14), Some(100.0));
    }

    #[test]
    fn rsi_is_midrange_for_alternating_moves() {
        let values: Vec<f64> = (0..20)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let value = rsi(&values, 14).unwrap();
        assert!(value > 40.0 && value < 60.0, "rsi = {}", value);
    }

    #[test]
    fn traditional_engine_flags_uptrend_as_bullish() {
        let candles: Vec<Candle> = (0..30).map(|i| candle(100.0 + i as f64)).collect();
        let report = TraditionalEngine.evaluate(&candles);
        assert_eq!(report.signal, Signal::Bullish);
        assert!(report.confidence > 0.0);
    }

    #[test]
    fn traditional_engine_scores_downtrend_bearish() {
        // Price below SMA and EMA (-2), RSI pinned at 0 by monotonic losses
        // (+1): score is -1/3, confidence its magnitude
        let candles: Vec<Candle> = (0..30).map(|i| candle(130.0 - i as f64)).collect();
        let report = TraditionalEngine.evaluate(&candles);
        assert_eq!(report.signal, Signal::Bearish);
        assert!((report.confidence - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn traditional_engine_neutral_without_enough_candles() {
        let candles: Vec<Candle> = (0..5).map(|i| candle(100.0 + i as f64)).collect();
        let report = TraditionalEngine.evaluate(&candles);
        assert_eq!(report.signal, Signal::Neutral);
        assert_eq!(report.confidence, 0.0);
    }

    #[test]
    fn scanner_flags_breakout_after_compression() {
        // 20 tight candles, then 10 wide rising ones
        let mut candles: Vec<Candle> = (0..20)
            .map(|_| candle_full(100.0, 99.9, 100.1, 100.0, 10.0))
            .collect();
        for i in 0..10 {
            let base = 100.0 + i as f64 * 2.0;
            candles.push(candle_full(base, base - 1.5, base + 1.5, base + 1.0, 50.0));
        }

        let report = ScannerEngine.evaluate(&candles);
        assert_eq!(report.signal, Signal::Bullish);
        assert!(report.confidence > 0.0);
    }

    #[test]
    fn scanner_neutral_on_flat_market() {
        let candles: Vec<Candle> = (0..40)
            .map(|_| candle_full(100.0, 99.9, 100.1, 100.0, 10.0))
            .collect();
        let report = ScannerEngine.evaluate(&candles);
        assert_eq!(report.signal, Signal::Neutral);
    }
}
