//! Offline market-data provider and signal sink.
//!
//! `ReplayProvider` serves candles from memory or from JSON fixture files,
//! implementing the same `CandleProvider` contract as a live broker client,
//! so the whole pipeline runs unchanged against recorded history.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use common::{Candle, CandleProvider, Error, Result, Signal, SignalSink, Timeframe};

/// Candle fixtures keyed by (pair, timeframe), served newest-tail-first the
/// way a broker's "last N candles" endpoint would.
#[derive(Default)]
pub struct ReplayProvider {
    series: RwLock<HashMap<(String, Timeframe), Vec<Candle>>>,
}

impl ReplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one series into the provider, replacing any previous fixture for
    /// the same key. Candles must already be oldest first.
    pub async fn load(&self, pair: &str, timeframe: Timeframe, candles: Vec<Candle>) {
        debug!(pair, %timeframe, count = candles.len(), "fixture loaded");
        self.series
            .write()
            .await
            .insert((pair.to_string(), timeframe), candles);
    }

    /// Load every `<PAIR>_<TIMEFRAME>.json` file in `dir`, each holding a
    /// JSON array of candles. Files that do not match the naming scheme are
    /// skipped.
    pub async fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let provider = Self::new();
        let mut loaded = 0;
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            // EUR_USD_H1.json → pair "EUR_USD", timeframe H1
            let Some((pair, tf_code)) = stem.rsplit_once('_') else {
                continue;
            };
            let Ok(timeframe) = Timeframe::from_str(tf_code) else {
                continue;
            };
            let candles: Vec<Candle> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
            provider.load(pair, timeframe, candles).await;
            loaded += 1;
        }
        info!(dir = %dir.as_ref().display(), loaded, "replay fixtures loaded");
        Ok(provider)
    }
}

#[async_trait]
impl CandleProvider for ReplayProvider {
    async fn fetch_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>> {
        let series = self.series.read().await;
        let Some(candles) = series.get(&(pair.to_string(), timeframe)) else {
            return Ok(Vec::new());
        };
        let start = candles.len().saturating_sub(count);
        Ok(candles[start..].to_vec())
    }

    async fn current_price(&self, pair: &str) -> Result<f64> {
        let series = self.series.read().await;
        // The finest loaded timeframe carries the freshest close.
        series
            .iter()
            .filter(|((p, _), candles)| p == pair && !candles.is_empty())
            .min_by_key(|((_, tf), _)| tf.minutes())
            .and_then(|(_, candles)| candles.last())
            .map(|c| c.close)
            .ok_or_else(|| Error::Provider(format!("no fixture data for {pair}")))
    }
}

/// Sink that records delivered signals in memory, for tests and dry runs.
#[derive(Default)]
pub struct MemorySink {
    delivered: RwLock<Vec<Signal>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn delivered(&self) -> Vec<Signal> {
        self.delivered.read().await.clone()
    }
}

#[async_trait]
impl SignalSink for MemorySink {
    async fn deliver(&self, signal: &Signal) -> Result<()> {
        info!(pair = %signal.pair, id = %signal.id, "signal recorded");
        self.delivered.write().await.push(signal.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candle(i: i64, close: f64) -> Candle {
        Candle {
            open_time: Utc.timestamp_opt(i * 3600, 0).unwrap(),
            open: close,
            high: close + 0.001,
            low: close - 0.001,
            close,
            volume: 100.0,
        }
    }

    #[tokio::test]
    async fn fetch_returns_the_newest_tail() {
        let provider = ReplayProvider::new();
        let candles: Vec<Candle> = (0..10).map(|i| candle(i, 1.08 + i as f64 * 0.001)).collect();
        provider.load("EUR_USD", Timeframe::H1, candles).await;

        let tail = provider.fetch_candles("EUR_USD", Timeframe::H1, 3).await.unwrap();
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].open_time, Utc.timestamp_opt(7 * 3600, 0).unwrap());
    }

    #[tokio::test]
    async fn fetch_of_unknown_series_is_empty() {
        let provider = ReplayProvider::new();
        let out = provider.fetch_candles("EUR_USD", Timeframe::H4, 10).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn current_price_is_the_last_close() {
        let provider = ReplayProvider::new();
        provider
            .load("EUR_USD", Timeframe::M15, vec![candle(0, 1.0800), candle(1, 1.0850)])
            .await;
        assert_eq!(provider.current_price("EUR_USD").await.unwrap(), 1.0850);
    }

    #[tokio::test]
    async fn current_price_without_data_is_a_provider_error() {
        let provider = ReplayProvider::new();
        assert!(matches!(
            provider.current_price("EUR_USD").await.unwrap_err(),
            Error::Provider(_)
        ));
    }

    #[tokio::test]
    async fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.delivered().await.is_empty());

        let mut signal: Signal = serde_json::from_value(serde_json::json!({
            "id": "a", "pair": "EUR_USD", "timeframe": "H1", "direction": "BUY",
            "strength": 0.5, "entry_price": 1.0950, "stop_loss": 1.0910,
            "take_profit_1": 1.0990, "take_profit_2": 1.1030, "take_profit_3": 1.1070,
            "risk_reward_1": 1.0, "risk_reward_2": 2.0, "risk_reward_3": 3.0,
            "reasons": [], "timestamp": "2024-06-03T12:00:00Z",
            "mtf_confirmation": true, "mtf_confirmation_percentage": 100.0,
            "session": "london",
            "volatility_info": { "atr_percentile": 60.0, "sufficient_volatility": true },
            "distance_pips": null, "proximity_score": null, "status": "ACTIVE"
        }))
        .unwrap();
        sink.deliver(&signal).await.unwrap();
        signal.id = "b".into();
        sink.deliver(&signal).await.unwrap();

        let delivered = sink.delivered().await;
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].id, "a");
        assert_eq!(delivered[1].id, "b");
    }
}
