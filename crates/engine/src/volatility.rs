use serde::{Deserialize, Serialize};

use common::VolatilityInfo;

/// Volatility gate tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityConfig {
    /// Trailing ATR values ranked against the latest one.
    pub window: usize,
    /// Minimum percentile rank required to emit a signal.
    pub min_percentile: f64,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self { window: 100, min_percentile: 20.0 }
    }
}

/// Rejects evaluations during dead markets by ranking the latest ATR against
/// its own recent history. Rejection is routine, not an error.
#[derive(Debug, Clone)]
pub struct VolatilityGate {
    cfg: VolatilityConfig,
}

impl VolatilityGate {
    pub fn new(cfg: VolatilityConfig) -> Self {
        Self { cfg }
    }

    /// Percentile rank of the final ATR value within the trailing window
    /// (the value ranks against itself, so a lone value sits at 100).
    /// An empty series ranks at 0 and is insufficient.
    pub fn assess(&self, atr_series: &[f64]) -> VolatilityInfo {
        let Some(&current) = atr_series.last() else {
            return VolatilityInfo { atr_percentile: 0.0, sufficient_volatility: false };
        };

        let start = atr_series.len().saturating_sub(self.cfg.window);
        let window = &atr_series[start..];
        let below = window.iter().filter(|&&v| v <= current).count();
        let atr_percentile = below as f64 / window.len() as f64 * 100.0;

        VolatilityInfo {
            atr_percentile,
            sufficient_volatility: atr_percentile >= self.cfg.min_percentile,
        }
    }
}
