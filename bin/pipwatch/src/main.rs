use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::{Config, Result, Signal, SignalSink};
use engine::{MarketStore, Scheduler, SignalConfig, SignalEngine};
use replay::ReplayProvider;

/// Sink that prints each signal to the log. Stands in for the notification
/// delivery channel, which lives outside this process.
struct LogSink;

#[async_trait]
impl SignalSink for LogSink {
    async fn deliver(&self, signal: &Signal) -> Result<()> {
        info!("{}", signal.render_text());
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(pairs = ?cfg.pairs, timeframes = ?cfg.timeframes, "PipWatch starting");

    let signal_cfg = SignalConfig::load(&cfg.signal_config_path)
        .unwrap_or_else(|e| panic!("Failed to load signal config: {e}"));

    // ── Market data (replayed fixtures) ──────────────────────────────────────
    let provider = match ReplayProvider::from_dir(&cfg.candle_data_dir).await {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            info!(dir = %cfg.candle_data_dir, error = %e, "no candle fixtures, starting empty");
            Arc::new(ReplayProvider::new())
        }
    };

    // ── Pipeline ──────────────────────────────────────────────────────────────
    let store = Arc::new(MarketStore::new(signal_cfg.series_cap));
    let engine = Arc::new(SignalEngine::new(store.clone(), signal_cfg));

    let scheduler = Scheduler::new(
        provider,
        Arc::new(LogSink),
        store,
        engine,
        cfg.pairs,
        cfg.timeframes,
        Duration::from_secs(cfg.poll_interval_secs),
    );

    scheduler.run().await;
}
