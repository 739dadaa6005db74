use serde::{Deserialize, Serialize};
use thiserror::Error;

use common::{pairs::round_price, Direction};

/// Stop-distance tuning for the level calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLevelConfig {
    /// Stop distance as a multiple of ATR.
    pub atr_multiplier: f64,
}

impl Default for RiskLevelConfig {
    fn default() -> Self {
        Self { atr_multiplier: 2.0 }
    }
}

/// Stop-loss and the three take-profit levels for a signal. Take-profits sit
/// at 1x/2x/3x multiples of the entry-to-stop distance, so the risk-reward
/// ratios are reported as 1, 2, 3 (exact up to pip rounding of the levels;
/// derivations where rounding would disturb the level ordering are refused).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub take_profit_3: f64,
    pub risk_reward_1: f64,
    pub risk_reward_2: f64,
    pub risk_reward_3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LevelError {
    /// ATR was zero/negative or so small the stop rounds onto the entry.
    /// Refusing here is what prevents zero-width stops downstream.
    #[error("degenerate volatility: cannot derive a stop distance from ATR {atr}")]
    DegenerateVolatility { atr: f64 },
}

/// Derive stop and targets from entry, direction and ATR, rounded to the
/// pair's quoted precision.
pub fn derive_levels(
    entry: f64,
    direction: Direction,
    atr: f64,
    cfg: &RiskLevelConfig,
    pip_position: u32,
) -> Result<RiskLevels, LevelError> {
    if !atr.is_finite() || atr <= 0.0 {
        return Err(LevelError::DegenerateVolatility { atr });
    }

    let risk_distance = atr * cfg.atr_multiplier;
    let signed = match direction {
        Direction::Buy => risk_distance,
        Direction::Sell => -risk_distance,
    };

    let levels = RiskLevels {
        stop_loss: round_price(entry - signed, pip_position),
        take_profit_1: round_price(entry + signed, pip_position),
        take_profit_2: round_price(entry + 2.0 * signed, pip_position),
        take_profit_3: round_price(entry + 3.0 * signed, pip_position),
        risk_reward_1: 1.0,
        risk_reward_2: 2.0,
        risk_reward_3: 3.0,
    };

    // A sub-pip distance can survive rounding at one multiple but collapse at
    // another, so the whole ladder must stay strictly ordered.
    let ladder = [
        levels.stop_loss,
        entry,
        levels.take_profit_1,
        levels.take_profit_2,
        levels.take_profit_3,
    ];
    let ordered = match direction {
        Direction::Buy => ladder.windows(2).all(|w| w[0] < w[1]),
        Direction::Sell => ladder.windows(2).all(|w| w[0] > w[1]),
    };
    if !ordered {
        return Err(LevelError::DegenerateVolatility { atr });
    }

    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_levels_match_reference_scenario() {
        // ATR 0.0025 x 1.6 = 0.0040 risk distance
        let cfg = RiskLevelConfig { atr_multiplier: 1.6 };
        let levels = derive_levels(1.0850, Direction::Buy, 0.0025, &cfg, 4).unwrap();
        assert_eq!(levels.stop_loss, 1.0810);
        assert_eq!(levels.take_profit_1, 1.0890);
        assert_eq!(levels.take_profit_2, 1.0930);
        assert_eq!(levels.take_profit_3, 1.0970);
        assert_eq!(levels.risk_reward_1, 1.0);
        assert_eq!(levels.risk_reward_2, 2.0);
        assert_eq!(levels.risk_reward_3, 3.0);
    }

    #[test]
    fn sell_levels_mirror_buy() {
        let cfg = RiskLevelConfig { atr_multiplier: 1.6 };
        let levels = derive_levels(1.0850, Direction::Sell, 0.0025, &cfg, 4).unwrap();
        assert_eq!(levels.stop_loss, 1.0890);
        assert_eq!(levels.take_profit_1, 1.0810);
        assert_eq!(levels.take_profit_2, 1.0770);
        assert_eq!(levels.take_profit_3, 1.0730);
    }

    #[test]
    fn zero_atr_is_refused() {
        let cfg = RiskLevelConfig::default();
        assert_eq!(
            derive_levels(1.0850, Direction::Buy, 0.0, &cfg, 4),
            Err(LevelError::DegenerateVolatility { atr: 0.0 })
        );
    }

    #[test]
    fn negative_atr_is_refused() {
        let cfg = RiskLevelConfig::default();
        assert!(derive_levels(1.0850, Direction::Buy, -0.001, &cfg, 4).is_err());
    }

    #[test]
    fn atr_below_quote_precision_is_refused() {
        // 0.00001 x 2.0 rounds to zero at 4 decimal places
        let cfg = RiskLevelConfig::default();
        assert!(derive_levels(1.0850, Direction::Buy, 0.00001, &cfg, 4).is_err());
    }

    #[test]
    fn sub_pip_distance_cannot_collapse_the_ladder() {
        // 0.000035 x 2.0 = 0.00007: the stop and tp1 survive rounding but
        // tp1 and tp2 would land on the same pip
        let cfg = RiskLevelConfig::default();
        assert_eq!(
            derive_levels(1.0850, Direction::Buy, 0.000035, &cfg, 4),
            Err(LevelError::DegenerateVolatility { atr: 0.000035 })
        );
        assert!(derive_levels(1.0850, Direction::Sell, 0.000035, &cfg, 4).is_err());
    }

    #[test]
    fn accepted_levels_are_always_strictly_ordered() {
        let cfg = RiskLevelConfig::default();
        for atr in [0.00003, 0.00005, 0.0001, 0.00025, 0.0007] {
            if let Ok(l) = derive_levels(1.0850, Direction::Buy, atr, &cfg, 4) {
                assert!(l.stop_loss < 1.0850, "atr {atr}");
                assert!(1.0850 < l.take_profit_1, "atr {atr}");
                assert!(l.take_profit_1 < l.take_profit_2, "atr {atr}");
                assert!(l.take_profit_2 < l.take_profit_3, "atr {atr}");
            }
        }
    }
}
