//! Prediction configuration: source weights, thresholds, strategy toggles and
//! indicator parameters.
//!
//! Configuration is a plain value passed into every evaluation. It is loaded from
//! a JSON file or from environment variables and validated once at load time;
//! evaluation never re-checks it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::signal::BucketKind;
use crate::models::strategy::StrategyKind;

pub const DEFAULT_STRATEGY_WEIGHT: f64 = 0.40;
pub const DEFAULT_ML_WEIGHT: f64 = 0.35;
pub const DEFAULT_NEWS_WEIGHT: f64 = 0.25;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 60.0;
pub const DEFAULT_HIGH_CONFIDENCE: f64 = 75.0;

/// Runtime environment name (`APP_ENV`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub strategy_weight: f64,
    pub ml_weight: f64,
    pub news_weight: f64,
    /// Minimum fused confidence for an actionable signal
    pub min_confidence_threshold: f64,
    /// Display-only marker
    pub high_confidence_threshold: f64,
    pub enabled_strategies: BTreeSet<StrategyKind>,
    pub atr_multiplier: f64,
    /// Minimum lead (confidence points) of the weighted BUY sum over the
    /// weighted SELL sum, or vice versa, for a directional fused signal
    pub fusion_dead_band: f64,
    pub indicators: IndicatorParams,
    pub strategies: StrategyParams,
    pub ml: MlParams,
    pub news: NewsParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy_weight: DEFAULT_STRATEGY_WEIGHT,
            ml_weight: DEFAULT_ML_WEIGHT,
            news_weight: DEFAULT_NEWS_WEIGHT,
            min_confidence_threshold: DEFAULT_MIN_CONFIDENCE,
            high_confidence_threshold: DEFAULT_HIGH_CONFIDENCE,
            enabled_strategies: StrategyKind::ALL.into_iter().collect(),
            atr_multiplier: 1.0,
            fusion_dead_band: 1.0,
            indicators: IndicatorParams::default(),
            strategies: StrategyParams::default(),
            ml: MlParams::default(),
            news: NewsParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub atr_period: usize,
    pub volume_period: usize,
    pub sr_lookback: usize,
    /// Relative distance under which pivot levels merge (0.02 = 2%)
    pub sr_cluster_threshold: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            ema_fast: 9,
            ema_slow: 21,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            atr_period: 14,
            volume_period: 20,
            sr_lookback: 50,
            sr_cluster_threshold: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    /// EMA gap (percent of slow EMA) that counts as an established trend
    pub ema_trend_threshold_pct: f64,
    /// Histogram bars used to scale MACD confidence
    pub macd_histogram_window: usize,
    pub volume_spike_multiplier: f64,
    /// Distance (percent of price) that counts as "at" a support/resistance level
    pub sr_proximity_pct: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            ema_trend_threshold_pct: 0.5,
            macd_histogram_window: 20,
            volume_spike_multiplier: 2.0,
            sr_proximity_pct: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlParams {
    /// Binary models: |p_up - 0.5| at or below this reads as NEUTRAL
    pub binary_neutral_band: f64,
}

impl Default for MlParams {
    fn default() -> Self {
        Self {
            binary_neutral_band: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsParams {
    /// |combined score| at or below this reads as NEUTRAL
    pub dead_band: f64,
}

impl Default for NewsParams {
    fn default() -> Self {
        Self { dead_band: 0.2 }
    }
}

impl Config {
    /// Configured (not yet normalized) weight of a bucket
    pub fn weight_for(&self, kind: BucketKind) -> f64 {
        match kind {
            BucketKind::Strategy => self.strategy_weight,
            BucketKind::Ml => self.ml_weight,
            BucketKind::News => self.news_weight,
        }
    }

    pub fn is_strategy_enabled(&self, kind: StrategyKind) -> bool {
        self.enabled_strategies.contains(&kind)
    }

    pub fn with_weights(mut self, strategy: f64, ml: f64, news: f64) -> Self {
        self.strategy_weight = strategy;
        self.ml_weight = ml;
        self.news_weight = news;
        self
    }

    pub fn with_enabled_strategies<I: IntoIterator<Item = StrategyKind>>(mut self, kinds: I) -> Self {
        self.enabled_strategies = kinds.into_iter().collect();
        self
    }

    pub fn with_min_confidence(mut self, threshold: f64) -> Self {
        self.min_confidence_threshold = threshold;
        self
    }

    pub fn with_atr_multiplier(mut self, multiplier: f64) -> Self {
        self.atr_multiplier = multiplier;
        self
    }

    /// Reject configurations the pipeline cannot evaluate
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("strategy_weight", self.strategy_weight),
            ("ml_weight", self.ml_weight),
            ("news_weight", self.news_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { field, value });
            }
        }
        if self.strategy_weight + self.ml_weight + self.news_weight <= 0.0 {
            return Err(ConfigError::ZeroWeights);
        }

        for (field, value) in [
            ("min_confidence_threshold", self.min_confidence_threshold),
            ("high_confidence_threshold", self.high_confidence_threshold),
            ("rsi_overbought", self.strategies.rsi_overbought),
            ("rsi_oversold", self.strategies.rsi_oversold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { field, value });
            }
        }
        if self.strategies.rsi_oversold >= self.strategies.rsi_overbought {
            return Err(ConfigError::InvalidParameter(
                "rsi_oversold must be below rsi_overbought".to_string(),
            ));
        }

        if !self.atr_multiplier.is_finite() || self.atr_multiplier <= 0.0 {
            return Err(ConfigError::InvalidAtrMultiplier(self.atr_multiplier));
        }
        if !self.fusion_dead_band.is_finite() || self.fusion_dead_band < 0.0 {
            return Err(ConfigError::InvalidParameter(
                "fusion_dead_band must be non-negative".to_string(),
            ));
        }

        self.indicators.validate()?;

        if !(0.0..0.5).contains(&self.ml.binary_neutral_band) {
            return Err(ConfigError::InvalidParameter(
                "ml.binary_neutral_band must be within [0, 0.5)".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.news.dead_band) {
            return Err(ConfigError::InvalidParameter(
                "news.dead_band must be within [0, 1)".to_string(),
            ));
        }
        if self.strategies.volume_spike_multiplier <= 0.0 || self.strategies.sr_proximity_pct <= 0.0 {
            return Err(ConfigError::InvalidParameter(
                "volume_spike_multiplier and sr_proximity_pct must be positive".to_string(),
            ));
        }
        if self.strategies.macd_histogram_window == 0 {
            return Err(ConfigError::InvalidParameter(
                "macd_histogram_window must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Load from a JSON file; missing fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();
        if let Some(v) = env_parse::<f64>("STRATEGY_WEIGHT")? {
            config.strategy_weight = v;
        }
        if let Some(v) = env_parse::<f64>("ML_WEIGHT")? {
            config.ml_weight = v;
        }
        if let Some(v) = env_parse::<f64>("NEWS_WEIGHT")? {
            config.news_weight = v;
        }
        if let Some(v) = env_parse::<f64>("MIN_CONFIDENCE_THRESHOLD")? {
            config.min_confidence_threshold = v;
        }
        if let Some(v) = env_parse::<f64>("HIGH_CONFIDENCE_THRESHOLD")? {
            config.high_confidence_threshold = v;
        }
        if let Some(v) = env_parse::<f64>("ATR_MULTIPLIER")? {
            config.atr_multiplier = v;
        }
        if let Ok(raw) = env::var("ENABLED_STRATEGIES") {
            config.enabled_strategies = parse_strategy_list(&raw)?;
        }

        config.validate()?;
        Ok(config)
    }
}

impl IndicatorParams {
    fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_period", self.bollinger_period),
            ("atr_period", self.atr_period),
            ("volume_period", self.volume_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ConfigError::InvalidParameter(format!("{} must be at least 1", name)));
        }
        if self.ema_fast >= self.ema_slow {
            return Err(ConfigError::InvalidParameter(
                "ema_fast must be shorter than ema_slow".to_string(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::InvalidParameter(
                "macd_fast must be shorter than macd_slow".to_string(),
            ));
        }
        // pivots need two bars on each side
        if self.sr_lookback < 5 {
            return Err(ConfigError::InvalidParameter(
                "sr_lookback must be at least 5".to_string(),
            ));
        }
        if !self.bollinger_std_dev.is_finite() || self.bollinger_std_dev <= 0.0 {
            return Err(ConfigError::InvalidParameter(
                "bollinger_std_dev must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.sr_cluster_threshold) {
            return Err(ConfigError::InvalidParameter(
                "sr_cluster_threshold must be within [0, 1)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a comma-separated list of strategy identifiers
pub fn parse_strategy_list(raw: &str) -> Result<BTreeSet<StrategyKind>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| StrategyKind::from_str(s).map_err(ConfigError::UnknownStrategy))
        .collect()
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| ConfigError::Parse {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(None),
    }
}
