use serde::{Deserialize, Serialize};

/// Proximity scoring tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Distance beyond which a signal leaves the "near" view.
    pub max_distance_pips: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self { max_distance_pips: 10.0 }
    }
}

/// Distance between a signal's entry and the live price.
///
/// A signal outside `max_distance_pips` drops out of the "near" view but
/// always remains visible in the full signal list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub distance_pips: f64,
    /// `1 - distance / max`, clamped to [0, 1]. 1 means the market is at
    /// the entry right now.
    pub proximity_score: f64,
    pub within_range: bool,
}

/// Pure proximity calculation; callable any number of times as the live
/// price moves, the signal itself is untouched.
pub fn score(entry_price: f64, current_price: f64, pip_size: f64, cfg: &ProximityConfig) -> Proximity {
    let distance_pips = (current_price - entry_price).abs() / pip_size;
    Proximity {
        distance_pips,
        proximity_score: (1.0 - distance_pips / cfg.max_distance_pips).clamp(0.0, 1.0),
        within_range: distance_pips <= cfg.max_distance_pips,
    }
}
