use proptest::prelude::*;

use common::Direction;
use risk::{derive_levels, RiskLevelConfig};

proptest! {
    /// For any accepted Buy derivation the full ordering invariant holds:
    /// stop < entry < tp1 < tp2 < tp3.
    #[test]
    fn buy_levels_preserve_ordering(
        entry in 0.5f64..5.0f64,
        atr in 0.00002f64..0.05f64,
        multiplier in 0.5f64..5.0f64,
    ) {
        let cfg = RiskLevelConfig { atr_multiplier: multiplier };
        if let Ok(levels) = derive_levels(entry, Direction::Buy, atr, &cfg, 4) {
            prop_assert!(levels.stop_loss < entry);
            prop_assert!(entry < levels.take_profit_1);
            prop_assert!(levels.take_profit_1 < levels.take_profit_2);
            prop_assert!(levels.take_profit_2 < levels.take_profit_3);
            prop_assert_eq!(levels.risk_reward_1, 1.0);
            prop_assert_eq!(levels.risk_reward_2, 2.0);
            prop_assert_eq!(levels.risk_reward_3, 3.0);
        }
    }

    /// Sell derivations hold the mirrored ordering.
    #[test]
    fn sell_levels_preserve_ordering(
        entry in 0.5f64..5.0f64,
        atr in 0.00002f64..0.05f64,
        multiplier in 0.5f64..5.0f64,
    ) {
        let cfg = RiskLevelConfig { atr_multiplier: multiplier };
        if let Ok(levels) = derive_levels(entry, Direction::Sell, atr, &cfg, 4) {
            prop_assert!(levels.stop_loss > entry);
            prop_assert!(entry > levels.take_profit_1);
            prop_assert!(levels.take_profit_1 > levels.take_profit_2);
            prop_assert!(levels.take_profit_2 > levels.take_profit_3);
        }
    }

    /// Non-positive ATR must always be refused, never produce levels.
    #[test]
    fn non_positive_atr_always_refused(
        entry in 0.5f64..5.0f64,
        atr in -1.0f64..=0.0f64,
    ) {
        let cfg = RiskLevelConfig::default();
        prop_assert!(derive_levels(entry, Direction::Buy, atr, &cfg, 4).is_err());
    }
}
