//! Support and Resistance levels detection

use crate::models::indicators::Candle;

/// Pivot bars need this many bars on each side
const PIVOT_SPAN: usize = 2;

/// Per-candle support/resistance readings
#[derive(Debug, Clone, PartialEq)]
pub struct SupportResistanceSeries {
    /// Nearest clustered pivot-low level below the close
    pub support: Vec<Option<f64>>,
    /// Nearest clustered pivot-high level above the close
    pub resistance: Vec<Option<f64>>,
    /// Resistance level the close crossed upward since the previous bar
    pub broken_resistance: Vec<Option<f64>>,
    /// Support level the close crossed downward since the previous bar
    pub broken_support: Vec<Option<f64>>,
}

/// Support and resistance levels found in one window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Levels {
    pub supports: Vec<f64>,
    pub resistances: Vec<f64>,
}

/// Calculate support and resistance for every candle
///
/// For each index the trailing `lookback` candles are scanned for pivot highs
/// and lows, nearby levels are merged, and the levels nearest to (or crossed
/// by) the close are reported. Indices before the first full window are `None`.
pub fn calculate_support_resistance(
    candles: &[Candle],
    lookback: usize,
    cluster_threshold: f64,
) -> SupportResistanceSeries {
    let n = candles.len();
    let mut series = SupportResistanceSeries {
        support: vec![None; n],
        resistance: vec![None; n],
        broken_resistance: vec![None; n],
        broken_support: vec![None; n],
    };
    if lookback == 0 || n < lookback {
        return series;
    }

    for i in (lookback - 1)..n {
        let window = &candles[i + 1 - lookback..=i];
        let levels = find_levels(window, cluster_threshold);
        let close = candles[i].close;

        series.support[i] = levels
            .supports
            .iter()
            .copied()
            .filter(|l| *l < close)
            .fold(None, |best: Option<f64>, l| Some(best.map_or(l, |b| b.max(l))));
        series.resistance[i] = levels
            .resistances
            .iter()
            .copied()
            .filter(|l| *l > close)
            .fold(None, |best: Option<f64>, l| Some(best.map_or(l, |b| b.min(l))));

        if i > 0 {
            let prev_close = candles[i - 1].close;
            series.broken_resistance[i] = levels
                .resistances
                .iter()
                .copied()
                .filter(|l| prev_close <= *l && *l < close)
                .fold(None, |best: Option<f64>, l| Some(best.map_or(l, |b| b.max(l))));
            series.broken_support[i] = levels
                .supports
                .iter()
                .copied()
                .filter(|l| close < *l && *l <= prev_close)
                .fold(None, |best: Option<f64>, l| Some(best.map_or(l, |b| b.min(l))));
        }
    }

    series
}

/// Pivot levels of a window, clustered
pub fn find_levels(window: &[Candle], cluster_threshold: f64) -> Levels {
    let (lows, highs) = find_pivots(window);
    Levels {
        supports: cluster_levels(lows, cluster_threshold),
        resistances: cluster_levels(highs, cluster_threshold),
    }
}

/// Pivot lows and highs: bars strictly below/above the two bars on each side
pub fn find_pivots(window: &[Candle]) -> (Vec<f64>, Vec<f64>) {
    let mut lows = Vec::new();
    let mut highs = Vec::new();
    if window.len() < 2 * PIVOT_SPAN + 1 {
        return (lows, highs);
    }

    for i in PIVOT_SPAN..window.len() - PIVOT_SPAN {
        let neighbours = (i - PIVOT_SPAN..=i + PIVOT_SPAN).filter(|&j| j != i);
        let high = window[i].high;
        let low = window[i].low;

        if neighbours.clone().all(|j| high > window[j].high) {
            highs.push(high);
        }
        if neighbours.into_iter().all(|j| low < window[j].low) {
            lows.push(low);
        }
    }
    (lows, highs)
}

/// Merge sorted levels within `threshold` (relative) of the previous member
/// of their cluster; each cluster is reported as its mean.
pub fn cluster_levels(mut levels: Vec<f64>, threshold: f64) -> Vec<f64> {
    levels.retain(|l| l.is_finite());
    if levels.is_empty() {
        return levels;
    }
    levels.sort_by(|a, b| a.total_cmp(b));

    let mut clustered = Vec::new();
    let mut cluster = vec![levels[0]];
    for &level in &levels[1..] {
        let last = cluster[cluster.len() - 1];
        if last != 0.0 && (level - last) / last <= threshold {
            cluster.push(level);
        } else {
            clustered.push(cluster.iter().sum::<f64>() / cluster.len() as f64);
            cluster = vec![level];
        }
    }
    clustered.push(cluster.iter().sum::<f64>() / cluster.len() as f64);
    clustered
}
