use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{debug, error, info, warn};

use common::{CandleProvider, SignalSink, Timeframe, Verdict};

use crate::assembler::SignalEngine;
use crate::store::MarketStore;

/// Extra candles fetched beyond the warm-up requirement, so indicator history
/// survives occasional provider gaps.
const FETCH_HEADROOM: usize = 50;

/// Drives the pipeline on a fixed cadence: refresh candles for every
/// (pair, timeframe) including the confirmation timeframes, then evaluate
/// each base pairing and hand signals to the sink.
///
/// Pairs are processed sequentially within a cycle. A provider or delivery
/// failure on one pairing is logged and the cycle moves on; only the caller
/// shutting down stops the loop.
pub struct Scheduler {
    provider: Arc<dyn CandleProvider>,
    sink: Arc<dyn SignalSink>,
    store: Arc<MarketStore>,
    engine: Arc<SignalEngine>,
    pairs: Vec<String>,
    timeframes: Vec<Timeframe>,
    poll_interval: Duration,
}

impl Scheduler {
    pub fn new(
        provider: Arc<dyn CandleProvider>,
        sink: Arc<dyn SignalSink>,
        store: Arc<MarketStore>,
        engine: Arc<SignalEngine>,
        pairs: Vec<String>,
        timeframes: Vec<Timeframe>,
        poll_interval: Duration,
    ) -> Self {
        Self { provider, sink, store, engine, pairs, timeframes, poll_interval }
    }

    /// Base timeframes plus every confirmation timeframe they pull in,
    /// deduplicated, so one refresh covers the whole evaluation.
    fn timeframes_to_refresh(&self) -> Vec<Timeframe> {
        let mut all = Vec::new();
        for &tf in &self.timeframes {
            if !all.contains(&tf) {
                all.push(tf);
            }
            for &higher in tf.confirmation_timeframes() {
                if !all.contains(&higher) {
                    all.push(higher);
                }
            }
        }
        all
    }

    /// Run forever on the configured cadence.
    pub async fn run(&self) {
        info!(
            pairs = self.pairs.len(),
            timeframes = ?self.timeframes,
            interval_secs = self.poll_interval.as_secs(),
            "scheduler started"
        );
        let mut ticker = time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// One full refresh-and-evaluate pass over every configured pairing.
    pub async fn run_cycle(&self) {
        let refresh = self.timeframes_to_refresh();
        let fetch_count = self.engine.required_candles() + FETCH_HEADROOM;

        for pair in &self.pairs {
            for &timeframe in &refresh {
                match self.provider.fetch_candles(pair, timeframe, fetch_count).await {
                    Ok(candles) => {
                        if let Err(e) = self.store.ingest(pair, timeframe, candles).await {
                            warn!(%pair, %timeframe, error = %e, "candle ingest failed");
                        }
                    }
                    Err(e) => warn!(%pair, %timeframe, error = %e, "candle fetch failed"),
                }
            }

            for &timeframe in &self.timeframes {
                self.evaluate_one(pair, timeframe).await;
            }
        }
    }

    async fn evaluate_one(&self, pair: &str, timeframe: Timeframe) {
        match self.engine.evaluate(pair, timeframe).await {
            Ok(Verdict::Signal(mut signal)) => {
                // Proximity is best effort; a stale price feed must not hold
                // the signal back.
                match self.provider.current_price(pair).await {
                    Ok(price) => {
                        if let Err(e) = self.engine.score_proximity(&mut signal, price) {
                            warn!(pair, error = %e, "proximity scoring failed");
                        }
                    }
                    Err(e) => warn!(pair, error = %e, "live price unavailable"),
                }

                if let Err(e) = self.sink.deliver(&signal).await {
                    error!(pair, %timeframe, error = %e, "signal delivery failed");
                }
            }
            Ok(Verdict::NoSignal(reason)) => {
                debug!(pair, %timeframe, %reason, "no signal");
            }
            Err(e) => {
                error!(pair, %timeframe, error = %e, "evaluation failed");
            }
        }
    }
}
