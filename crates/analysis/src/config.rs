use serde::{Deserialize, Serialize};

/// Indicator periods. Warm-up is derived from the maximum requirement of any
/// indicator (the slow SMA with defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub atr_period: usize,
    pub stochastic_lookback: usize,
    pub stochastic_smooth: usize,
    pub stochastic_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            sma_fast: 50,
            sma_slow: 200,
            atr_period: 14,
            stochastic_lookback: 14,
            stochastic_smooth: 3,
            stochastic_signal: 3,
            bollinger_period: 20,
            bollinger_k: 2.0,
        }
    }
}

/// Condition-scorer thresholds and weights.
///
/// The defaults reproduce the production tuning: RSI and MACD carry weight 2,
/// the trend filter 3, Bollinger and Stochastic 1 each, for a maximum
/// achievable total of 9. A direction needs at least `min_score` and must
/// beat the other side by more than `margin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub stochastic_oversold: f64,
    pub stochastic_overbought: f64,
    pub weight_rsi: f64,
    pub weight_macd: f64,
    pub weight_trend: f64,
    pub weight_bollinger: f64,
    pub weight_stochastic: f64,
    pub min_score: f64,
    pub margin: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
            weight_rsi: 2.0,
            weight_macd: 2.0,
            weight_trend: 3.0,
            weight_bollinger: 1.0,
            weight_stochastic: 1.0,
            min_score: 3.0,
            margin: 0.0,
        }
    }
}

impl ScoreConfig {
    /// Sum of all condition weights, the normalizer for `strength`.
    pub fn max_weight(&self) -> f64 {
        self.weight_rsi
            + self.weight_macd
            + self.weight_trend
            + self.weight_bollinger
            + self.weight_stochastic
    }
}
