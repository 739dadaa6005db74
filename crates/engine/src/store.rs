use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use common::{Candle, Error, Result, Timeframe};

/// Bounded, time-ordered series of closed candles for one (pair, timeframe).
/// Oldest bars are evicted when the cap is reached.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    candles: VecDeque<Candle>,
    cap: usize,
}

impl CandleSeries {
    pub fn new(cap: usize) -> Self {
        assert!(cap > 0, "series capacity must be positive");
        Self { candles: VecDeque::with_capacity(cap), cap }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Append one closed candle.
    ///
    /// Returns `Ok(true)` when stored, `Ok(false)` when the candle is a
    /// re-delivery of the newest bar already held (poll overlap, skipped
    /// idempotently). A candle that is malformed or moves backwards in time
    /// is a data-contract violation and is rejected hard.
    pub fn push(&mut self, pair: &str, candle: Candle) -> Result<bool> {
        if !candle.is_well_formed() {
            return Err(Error::MalformedCandle {
                pair: pair.to_string(),
                detail: format!("bad OHLCV fields at {}", candle.open_time),
            });
        }
        if let Some(last) = self.candles.back() {
            if candle.open_time == last.open_time {
                return Ok(false);
            }
            if candle.open_time < last.open_time {
                return Err(Error::MalformedCandle {
                    pair: pair.to_string(),
                    detail: format!(
                        "non-monotonic open_time {} after {}",
                        candle.open_time, last.open_time
                    ),
                });
            }
        }
        if self.candles.len() == self.cap {
            self.candles.pop_front();
        }
        self.candles.push_back(candle);
        Ok(true)
    }

    /// Immutable copy of the series, oldest first.
    pub fn snapshot(&self) -> Vec<Candle> {
        self.candles.iter().copied().collect()
    }
}

/// All candle series, keyed by (pair, timeframe).
///
/// Only the ingestion step takes the write lock; every downstream consumer
/// works on a snapshot copy so a concurrent refresh can never interleave
/// with scoring.
pub struct MarketStore {
    series: RwLock<HashMap<(String, Timeframe), CandleSeries>>,
    cap: usize,
}

impl MarketStore {
    pub fn new(cap: usize) -> Self {
        Self { series: RwLock::new(HashMap::new()), cap }
    }

    /// Ingest a batch of closed candles, oldest first. Returns the number of
    /// bars actually appended (overlap with previously ingested history is
    /// skipped).
    pub async fn ingest(
        &self,
        pair: &str,
        timeframe: Timeframe,
        candles: Vec<Candle>,
    ) -> Result<usize> {
        let mut map = self.series.write().await;
        let series = map
            .entry((pair.to_string(), timeframe))
            .or_insert_with(|| CandleSeries::new(self.cap));
        let tail = series.candles.back().map(|c| c.open_time);

        let mut appended = 0;
        let mut prev_time: Option<DateTime<Utc>> = None;
        for candle in candles {
            // The batch itself must be time-ordered; a disordered provider is
            // a data-contract violation, not overlap.
            if prev_time.is_some_and(|prev| candle.open_time < prev) {
                return Err(Error::MalformedCandle {
                    pair: pair.to_string(),
                    detail: format!("disordered batch at {}", candle.open_time),
                });
            }
            prev_time = Some(candle.open_time);

            // Poll overlap re-delivers bars we already hold.
            if tail.is_some_and(|t| candle.open_time < t) {
                continue;
            }
            if series.push(pair, candle)? {
                appended += 1;
            }
        }
        debug!(pair, %timeframe, appended, total = series.len(), "candles ingested");
        Ok(appended)
    }

    /// Snapshot of one series; empty when nothing was ingested yet.
    pub async fn snapshot(&self, pair: &str, timeframe: Timeframe) -> Vec<Candle> {
        self.series
            .read()
            .await
            .get(&(pair.to_string(), timeframe))
            .map(|s| s.snapshot())
            .unwrap_or_default()
    }

    pub async fn len(&self, pair: &str, timeframe: Timeframe) -> usize {
        self.series
            .read()
            .await
            .get(&(pair.to_string(), timeframe))
            .map(|s| s.len())
            .unwrap_or(0)
    }
}
