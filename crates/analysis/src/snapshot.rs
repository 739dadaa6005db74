use common::Candle;

use crate::config::IndicatorConfig;
use crate::indicators::{
    sma, AtrIndicator, BollingerIndicator, MacdIndicator, RsiIndicator, StochasticIndicator,
};

/// All indicator values at one candle index, plus the close they were
/// computed against (the scoring rules reference it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub sma_fast: f64,
    pub sma_slow: f64,
    pub atr: f64,
    pub stochastic_k: f64,
    pub stochastic_d: f64,
    pub bollinger_upper: f64,
    pub bollinger_lower: f64,
}

/// Computes indicator snapshots from a candle series.
///
/// Deterministic and lookahead-free: a snapshot at index `i` is a pure
/// function of `candles[..=i]`. Below the warm-up window no snapshot exists,
/// which callers report as "insufficient data" rather than an error.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    cfg: IndicatorConfig,
    rsi: RsiIndicator,
    macd: MacdIndicator,
    atr: AtrIndicator,
    stochastic: StochasticIndicator,
    bollinger: BollingerIndicator,
}

impl IndicatorEngine {
    pub fn new(cfg: IndicatorConfig) -> Self {
        let rsi = RsiIndicator::new(cfg.rsi_period);
        let macd = MacdIndicator::new(cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
        let atr = AtrIndicator::new(cfg.atr_period);
        let stochastic = StochasticIndicator::new(
            cfg.stochastic_lookback,
            cfg.stochastic_smooth,
            cfg.stochastic_signal,
        );
        let bollinger = BollingerIndicator::new(cfg.bollinger_period, cfg.bollinger_k);
        Self { cfg, rsi, macd, atr, stochastic, bollinger }
    }

    /// Candles needed before the first snapshot exists (200 with defaults,
    /// dominated by the slow SMA).
    pub fn warm_up(&self) -> usize {
        [
            self.cfg.sma_slow,
            self.cfg.sma_fast,
            self.macd.min_len(),
            self.cfg.rsi_period + 1,
            self.cfg.atr_period + 1,
            self.stochastic.min_len(),
            self.cfg.bollinger_period,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Snapshot at the last index of `candles`, or `None` below warm-up.
    pub fn snapshot(&self, candles: &[Candle]) -> Option<IndicatorSnapshot> {
        if candles.len() < self.warm_up() {
            return None;
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let macd = self.macd.compute(&closes)?;
        let stoch = self.stochastic.compute(candles)?;
        let bands = self.bollinger.compute(&closes)?;

        Some(IndicatorSnapshot {
            close: *closes.last()?,
            rsi: self.rsi.compute(&closes)?,
            macd: macd.macd,
            macd_signal: macd.signal,
            macd_hist: macd.histogram,
            sma_fast: sma(&closes, self.cfg.sma_fast)?,
            sma_slow: sma(&closes, self.cfg.sma_slow)?,
            atr: self.atr.compute(candles)?,
            stochastic_k: stoch.k,
            stochastic_d: stoch.d,
            bollinger_upper: bands.upper,
            bollinger_lower: bands.lower,
        })
    }

    /// Snapshots at the previous and latest index, for the condition scorer.
    /// Requires `warm_up() + 1` candles so both are defined.
    pub fn latest_pair(&self, candles: &[Candle]) -> Option<(IndicatorSnapshot, IndicatorSnapshot)> {
        if candles.len() < self.warm_up() + 1 {
            return None;
        }
        let previous = self.snapshot(&candles[..candles.len() - 1])?;
        let current = self.snapshot(candles)?;
        Some((previous, current))
    }

    /// ATR series for the volatility gate, one value per index from
    /// `atr_period` onward.
    pub fn atr_series(&self, candles: &[Candle]) -> Vec<f64> {
        self.atr.series(candles)
    }
}
