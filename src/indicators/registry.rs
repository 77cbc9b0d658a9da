//! Indicator registry: computes the full indicator series for a candle sequence

use crate::config::IndicatorParams;
use crate::indicators::momentum::{calculate_macd, calculate_rsi};
use crate::indicators::structure::calculate_support_resistance;
use crate::indicators::trend::calculate_ema;
use crate::indicators::volatility::{calculate_atr, calculate_bollinger_bands};
use crate::indicators::volume::calculate_volume_sma;
use crate::models::indicators::{names, Candle, IndicatorSeries};

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorCategory {
    Momentum,
    Trend,
    Volatility,
    Volume,
    Structure,
}

pub struct IndicatorRegistry;

impl IndicatorRegistry {
    /// Compute every indicator the strategies and the target pricer read
    pub fn compute(candles: &[Candle], params: &IndicatorParams) -> IndicatorSeries {
        let mut series = IndicatorSeries::new(candles.len());

        series.insert(names::CLOSE, candles.iter().map(|c| Some(c.close)).collect());
        series.insert(names::VOLUME, candles.iter().map(|c| Some(c.volume)).collect());

        series.insert(names::RSI, calculate_rsi(candles, params.rsi_period));
        series.insert(names::EMA_FAST, calculate_ema(candles, params.ema_fast));
        series.insert(names::EMA_SLOW, calculate_ema(candles, params.ema_slow));

        let macd = calculate_macd(candles, params.macd_fast, params.macd_slow, params.macd_signal);
        series.insert(names::MACD, macd.macd);
        series.insert(names::MACD_SIGNAL, macd.signal);
        series.insert(names::MACD_HISTOGRAM, macd.histogram);

        let bands = calculate_bollinger_bands(candles, params.bollinger_period, params.bollinger_std_dev);
        series.insert(names::BB_UPPER, bands.upper);
        series.insert(names::BB_MIDDLE, bands.middle);
        series.insert(names::BB_LOWER, bands.lower);

        series.insert(names::ATR, calculate_atr(candles, params.atr_period));
        series.insert(names::VOLUME_SMA, calculate_volume_sma(candles, params.volume_period));

        let levels = calculate_support_resistance(candles, params.sr_lookback, params.sr_cluster_threshold);
        series.insert(names::SUPPORT, levels.support);
        series.insert(names::RESISTANCE, levels.resistance);
        series.insert(names::BROKEN_RESISTANCE, levels.broken_resistance);
        series.insert(names::BROKEN_SUPPORT, levels.broken_support);

        series
    }

    /// Candles needed before `name` produces its first value
    pub fn warm_up(name: &str, params: &IndicatorParams) -> Option<usize> {
        let candles = match name {
            names::CLOSE | names::VOLUME => 1,
            names::RSI => params.rsi_period + 1,
            names::EMA_FAST => params.ema_fast,
            names::EMA_SLOW => params.ema_slow,
            names::MACD => params.macd_slow,
            names::MACD_SIGNAL | names::MACD_HISTOGRAM => params.macd_slow + params.macd_signal - 1,
            names::BB_UPPER | names::BB_MIDDLE | names::BB_LOWER => params.bollinger_period,
            names::ATR => params.atr_period + 1,
            names::VOLUME_SMA => params.volume_period,
            names::SUPPORT | names::RESISTANCE | names::BROKEN_RESISTANCE | names::BROKEN_SUPPORT => {
                params.sr_lookback
            }
            _ => return None,
        };
        Some(candles)
    }

    /// Longest warm-up across all indicators
    pub fn required_candles(params: &IndicatorParams) -> usize {
        Self::all_names()
            .iter()
            .filter_map(|name| Self::warm_up(name, params))
            .max()
            .unwrap_or(0)
    }

    pub fn category(name: &str) -> Option<IndicatorCategory> {
        let category = match name {
            names::RSI | names::MACD | names::MACD_SIGNAL | names::MACD_HISTOGRAM => {
                IndicatorCategory::Momentum
            }
            names::EMA_FAST | names::EMA_SLOW => IndicatorCategory::Trend,
            names::BB_UPPER | names::BB_MIDDLE | names::BB_LOWER | names::ATR => {
                IndicatorCategory::Volatility
            }
            names::VOLUME | names::VOLUME_SMA => IndicatorCategory::Volume,
            names::SUPPORT | names::RESISTANCE | names::BROKEN_RESISTANCE | names::BROKEN_SUPPORT => {
                IndicatorCategory::Structure
            }
            _ => return None,
        };
        Some(category)
    }

    pub fn all_names() -> [&'static str; 17] {
        [
            names::CLOSE,
            names::VOLUME,
            names::RSI,
            names::EMA_FAST,
            names::EMA_SLOW,
            names::MACD,
            names::MACD_SIGNAL,
            names::MACD_HISTOGRAM,
            names::BB_UPPER,
            names::BB_MIDDLE,
            names::BB_LOWER,
            names::ATR,
            names::VOLUME_SMA,
            names::SUPPORT,
            names::RESISTANCE,
            names::BROKEN_RESISTANCE,
            names::BROKEN_SUPPORT,
        ]
    }
}
