use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use common::{Direction, ThrottleReason, Timeframe};

/// Dedup / rate-limit tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Minimum seconds between emissions for the same
    /// (pair, timeframe, direction).
    pub min_interval_secs: u64,
    /// Maximum emissions per pair per UTC calendar day.
    pub max_daily_per_pair: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { min_interval_secs: 900, max_daily_per_pair: 10 }
    }
}

#[derive(Debug, Default)]
struct ThrottleState {
    last_emission: HashMap<(String, Timeframe, Direction), DateTime<Utc>>,
    daily: HashMap<(String, NaiveDate), u32>,
}

/// Suppresses redundant signals per key and caps per-pair daily volume.
///
/// The interval check and the counter update happen under one lock so two
/// concurrent evaluations of the same key can never both pass. State is only
/// recorded for admitted emissions; a rejection leaves it untouched.
pub struct SignalThrottle {
    cfg: ThrottleConfig,
    state: Mutex<ThrottleState>,
}

impl SignalThrottle {
    pub fn new(cfg: ThrottleConfig) -> Self {
        Self { cfg, state: Mutex::new(ThrottleState::default()) }
    }

    /// Atomic check-and-record. `Ok(())` admits the emission and stamps both
    /// the per-key timestamp and the daily counter.
    pub async fn admit(
        &self,
        pair: &str,
        timeframe: Timeframe,
        direction: Direction,
        now: DateTime<Utc>,
    ) -> Result<(), ThrottleReason> {
        let mut state = self.state.lock().await;

        let key = (pair.to_string(), timeframe, direction);
        if let Some(last) = state.last_emission.get(&key) {
            let elapsed = (now - *last).num_seconds();
            if elapsed >= 0 && (elapsed as u64) < self.cfg.min_interval_secs {
                return Err(ThrottleReason::IntervalNotElapsed {
                    elapsed_secs: elapsed,
                    min_interval_secs: self.cfg.min_interval_secs,
                });
            }
        }

        let today = now.date_naive();
        let day_key = (pair.to_string(), today);
        let emitted = state.daily.get(&day_key).copied().unwrap_or(0);
        if emitted >= self.cfg.max_daily_per_pair {
            return Err(ThrottleReason::DailyCapReached {
                emitted,
                cap: self.cfg.max_daily_per_pair,
            });
        }

        state.last_emission.insert(key, now);
        state.daily.insert(day_key, emitted + 1);
        // Each pair runs on its own candle clock, so only this pair's
        // counters from other days are dead weight.
        state.daily.retain(|(p, date), _| p != pair || *date == today);

        debug!(pair, %timeframe, %direction, emitted = emitted + 1, "emission admitted");
        Ok(())
    }
}
