use async_trait::async_trait;

use crate::{Candle, Result, Signal, Timeframe};

/// Abstraction over the market-data source.
///
/// Implementations must deliver closed candles in strictly increasing
/// `open_time` order per (pair, timeframe). A broker REST client implements
/// this in production; `replay::ReplayProvider` implements it for simulation
/// and tests.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch up to `count` most recent closed candles, oldest first.
    async fn fetch_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>>;

    /// Latest traded price for a pair, used for proximity scoring.
    async fn current_price(&self, pair: &str) -> Result<f64>;
}

/// Abstraction over the notification channel. Delivery acknowledgment is the
/// `Ok(())`; the engine does not retry.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn deliver(&self, signal: &Signal) -> Result<()>;
}
