//! Bollinger Bands strategy: band breaches and band position

use crate::config::StrategyParams;
use crate::indicators::volatility::band_position;
use crate::models::indicators::{names, IndicatorSeries};
use crate::models::signal::Signal;
use crate::models::strategy::{StrategyKind, StrategySignal};

pub fn evaluate(series: &IndicatorSeries, _params: &StrategyParams) -> StrategySignal {
    let (Some(close), Some(upper), Some(middle), Some(lower)) = (
        series.latest(names::CLOSE),
        series.latest(names::BB_UPPER),
        series.latest(names::BB_MIDDLE),
        series.latest(names::BB_LOWER),
    ) else {
        return StrategySignal::insufficient_data(StrategyKind::Bollinger);
    };

    let position = band_position(close, lower, upper);
    let collapsed = upper - lower <= f64::EPSILON * middle.abs();

    let (signal, confidence, reason) = if collapsed {
        (Signal::Neutral, 40.0, "Bands collapsed on flat prices".to_string())
    } else if close < lower && lower > 0.0 {
        let below_pct = (lower - close) / lower * 100.0;
        (
            Signal::Buy,
            (60.0 + below_pct * 20.0).min(100.0),
            format!("Close {:.2}% below lower band", below_pct),
        )
    } else if close > upper && upper > 0.0 {
        let above_pct = (close - upper) / upper * 100.0;
        (
            Signal::Sell,
            (60.0 + above_pct * 20.0).min(100.0),
            format!("Close {:.2}% above upper band", above_pct),
        )
    } else if close < middle && position < 0.3 {
        (
            Signal::Buy,
            40.0 + (0.3 - position) * 50.0,
            "Close in lower band zone".to_string(),
        )
    } else if close > middle && position > 0.7 {
        (
            Signal::Sell,
            40.0 + (position - 0.7) * 50.0,
            "Close in upper band zone".to_string(),
        )
    } else {
        (
            Signal::Neutral,
            (40.0 - (position - 0.5).abs() * 40.0).max(20.0),
            "Close inside bands".to_string(),
        )
    };

    let mut out = StrategySignal::new(StrategyKind::Bollinger, signal, confidence, reason)
        .with_detail("upper", upper)
        .with_detail("middle", middle)
        .with_detail("lower", lower)
        .with_detail("position", position);
    if middle != 0.0 {
        out = out.with_detail("band_width_pct", (upper - lower) / middle * 100.0);
    }
    out
}
