use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use analysis::{IndicatorConfig, IndicatorEngine};
use common::Candle;

fn candles_from_closes(closes: &[f64], spread: f64) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            open_time: Utc.timestamp_opt(i as i64 * 3600, 0).unwrap(),
            open: close,
            high: close + spread,
            low: close - spread,
            close,
            volume: 1.0,
        })
        .collect()
}

proptest! {
    /// Bounded oscillators stay in range and volatility stays positive for
    /// any positive price path long enough to warm up.
    #[test]
    fn snapshot_values_stay_in_their_domains(
        seed in 1.0f64..100.0f64,
        steps in proptest::collection::vec(-0.01f64..0.01f64, 220),
        spread in 0.001f64..0.1f64,
    ) {
        let mut close = seed;
        let closes: Vec<f64> = steps
            .iter()
            .map(|step| {
                close = (close * (1.0 + step)).max(0.01);
                close
            })
            .collect();
        let candles = candles_from_closes(&closes, spread);

        let engine = IndicatorEngine::new(IndicatorConfig::default());
        let snap = engine.snapshot(&candles).unwrap();

        prop_assert!((0.0..=100.0).contains(&snap.rsi));
        prop_assert!((0.0..=100.0).contains(&snap.stochastic_k));
        prop_assert!((0.0..=100.0).contains(&snap.stochastic_d));
        prop_assert!(snap.atr > 0.0);
        prop_assert!(snap.bollinger_upper >= snap.bollinger_lower);
        prop_assert!(snap.macd.is_finite());
        prop_assert!(snap.macd_hist.is_finite());
    }

    /// A snapshot is a pure function of its prefix: the "previous" snapshot
    /// seen one candle later equals the one computed directly.
    #[test]
    fn snapshots_are_lookahead_free(
        steps in proptest::collection::vec(-0.005f64..0.005f64, 230),
    ) {
        let mut close = 10.0;
        let closes: Vec<f64> = steps
            .iter()
            .map(|step| {
                close *= 1.0 + step;
                close
            })
            .collect();
        let candles = candles_from_closes(&closes, 0.02);

        let engine = IndicatorEngine::new(IndicatorConfig::default());
        let direct = engine.snapshot(&candles[..220]).unwrap();
        let (previous, _) = engine.latest_pair(&candles[..221]).unwrap();
        prop_assert_eq!(direct, previous);
    }
}
