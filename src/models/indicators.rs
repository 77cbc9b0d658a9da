use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One OHLCV candle. `timestamp` is the candle's open time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Series names produced by the indicator library.
pub mod names {
    pub const CLOSE: &str = "close";
    pub const VOLUME: &str = "volume";
    pub const RSI: &str = "rsi_14";
    pub const EMA_FAST: &str = "ema_fast";
    pub const EMA_SLOW: &str = "ema_slow";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_HISTOGRAM: &str = "macd_histogram";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_LOWER: &str = "bb_lower";
    pub const ATR: &str = "atr_14";
    pub const VOLUME_SMA: &str = "volume_sma";
    pub const SUPPORT: &str = "support";
    pub const RESISTANCE: &str = "resistance";
    pub const BROKEN_RESISTANCE: &str = "broken_resistance";
    pub const BROKEN_SUPPORT: &str = "broken_support";
}

/// Indicator name -> values aligned index-for-index with the input candles.
///
/// `None` marks an index before the indicator's warm-up (or an undefined value);
/// it is never replaced by zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    len: usize,
    series: BTreeMap<String, Vec<Option<f64>>>,
}

impl IndicatorSeries {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            series: BTreeMap::new(),
        }
    }

    /// Number of candles every series is aligned to
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a series. Lengths must match the candle count; shorter input is
    /// padded with `None` at the front so the tail stays aligned.
    pub fn insert(&mut self, name: &str, mut values: Vec<Option<f64>>) {
        if values.len() < self.len {
            let mut padded = vec![None; self.len - values.len()];
            padded.append(&mut values);
            values = padded;
        }
        values.truncate(self.len);
        self.series.insert(name.to_string(), values);
    }

    pub fn get(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Value of `name` at `index`, `None` if absent or not yet available
    pub fn value_at(&self, name: &str, index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|values| values.get(index).copied().flatten())
    }

    /// Value at the last index
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.last_index().and_then(|i| self.value_at(name, i))
    }

    /// Value one index before the last
    pub fn previous(&self, name: &str) -> Option<f64> {
        self.last_index()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.value_at(name, i))
    }

    pub fn last_index(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }

    /// Up to `count` most recent available values of `name`, oldest first
    pub fn recent_values(&self, name: &str, count: usize) -> Vec<f64> {
        let Some(values) = self.series.get(name) else {
            return Vec::new();
        };
        let start = values.len().saturating_sub(count);
        values[start..].iter().filter_map(|v| *v).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }
}
