//! EMA crossover strategy: golden/death crosses and established gaps

use crate::config::StrategyParams;
use crate::indicators::trend::{check_ema_cross, EmaCross};
use crate::models::indicators::{names, IndicatorSeries};
use crate::models::signal::Signal;
use crate::models::strategy::{StrategyKind, StrategySignal};

pub fn evaluate(series: &IndicatorSeries, params: &StrategyParams) -> StrategySignal {
    let (Some(fast), Some(slow), Some(prev_fast), Some(prev_slow)) = (
        series.latest(names::EMA_FAST),
        series.latest(names::EMA_SLOW),
        series.previous(names::EMA_FAST),
        series.previous(names::EMA_SLOW),
    ) else {
        return StrategySignal::insufficient_data(StrategyKind::EmaCrossover);
    };
    if slow == 0.0 {
        return StrategySignal::insufficient_data(StrategyKind::EmaCrossover);
    }

    let diff_pct = (fast - slow) / slow * 100.0;
    let cross = check_ema_cross(prev_fast, prev_slow, fast, slow);
    let trending = diff_pct.abs() > params.ema_trend_threshold_pct;

    let (signal, confidence, reason) = if cross == EmaCross::Golden || (fast > slow && trending) {
        let reason = if cross == EmaCross::Golden {
            "Golden cross".to_string()
        } else {
            format!("Fast EMA {:.3}% above slow", diff_pct)
        };
        (Signal::Buy, (50.0 + diff_pct.abs() * 10.0).min(100.0), reason)
    } else if cross == EmaCross::Death || (fast < slow && trending) {
        let reason = if cross == EmaCross::Death {
            "Death cross".to_string()
        } else {
            format!("Fast EMA {:.3}% below slow", diff_pct.abs())
        };
        (Signal::Sell, (50.0 + diff_pct.abs() * 10.0).min(100.0), reason)
    } else {
        (
            Signal::Neutral,
            (40.0 - diff_pct.abs() * 5.0).max(20.0),
            "EMAs converged".to_string(),
        )
    };

    StrategySignal::new(StrategyKind::EmaCrossover, signal, confidence, reason)
        .with_detail("ema_fast", fast)
        .with_detail("ema_slow", slow)
        .with_detail("diff_pct", diff_pct)
}
