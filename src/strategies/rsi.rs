//! RSI strategy: fade overbought/oversold readings

use crate::config::StrategyParams;
use crate::indicators::momentum::{rsi_zone, RsiZone};
use crate::models::indicators::{names, IndicatorSeries};
use crate::models::signal::Signal;
use crate::models::strategy::{StrategyKind, StrategySignal};

pub fn evaluate(series: &IndicatorSeries, params: &StrategyParams) -> StrategySignal {
    let Some(rsi) = series.latest(names::RSI) else {
        return StrategySignal::insufficient_data(StrategyKind::Rsi);
    };

    let (signal, confidence, reason) = match rsi_zone(rsi, params.rsi_overbought, params.rsi_oversold) {
        RsiZone::Oversold => (
            Signal::Buy,
            (50.0 + (params.rsi_oversold - rsi) * 2.0).min(100.0),
            format!("RSI oversold: {:.2}", rsi),
        ),
        RsiZone::Overbought => (
            Signal::Sell,
            (50.0 + (rsi - params.rsi_overbought) * 2.0).min(100.0),
            format!("RSI overbought: {:.2}", rsi),
        ),
        // weaker the closer to 50
        RsiZone::Neutral => (
            Signal::Neutral,
            (rsi - 50.0).abs().max(20.0),
            format!("RSI neutral: {:.2}", rsi),
        ),
    };

    StrategySignal::new(StrategyKind::Rsi, signal, confidence, reason)
        .with_detail("rsi", rsi)
        .with_detail("overbought", params.rsi_overbought)
        .with_detail("oversold", params.rsi_oversold)
}
