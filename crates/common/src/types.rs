use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timeframe::Timeframe;

/// One closed OHLCV bar.
///
/// `open_time` must be strictly increasing within a series; the ingestion
/// layer rejects anything else before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Basic data-contract check: finite fields, non-negative volume,
    /// `high >= low`. Timestamp ordering is checked by the series, not here.
    pub fn is_well_formed(&self) -> bool {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        fields.iter().all(|v| v.is_finite()) && self.volume >= 0.0 && self.high >= self.low
    }
}

/// Direction of a published signal. Neutral evaluations never become one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifecycle state of a signal. Expiry is applied by the external store
/// after the validity window, never by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStatus {
    #[default]
    Active,
    Expired,
}

/// Volatility assessment attached to every published signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityInfo {
    /// Percentile rank of the latest ATR within the trailing window, 0-100.
    pub atr_percentile: f64,
    pub sufficient_volatility: bool,
}

/// An actionable trade signal as served to collaborators (JSON field names
/// are the wire contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub pair: String,
    pub timeframe: Timeframe,
    pub direction: Direction,
    /// Normalized condition score, always within [0, 1].
    pub strength: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub take_profit_3: f64,
    pub risk_reward_1: f64,
    pub risk_reward_2: f64,
    pub risk_reward_3: f64,
    pub reasons: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub mtf_confirmation: bool,
    /// Share of higher timeframes agreeing with the direction, 0-100.
    pub mtf_confirmation_percentage: f64,
    pub session: String,
    pub volatility_info: VolatilityInfo,
    /// Set only when the signal has been scored against a live price.
    pub distance_pips: Option<f64>,
    pub proximity_score: Option<f64>,
    pub status: SignalStatus,
}

impl Signal {
    /// Plain-text rendering for notification sinks and logs.
    pub fn render_text(&self) -> String {
        format!(
            "{} {} {} | strength {:.0}% | entry {} stop {} | TP {} / {} / {} | MTF {:.0}%{} | {}",
            self.pair,
            self.timeframe,
            self.direction,
            self.strength * 100.0,
            self.entry_price,
            self.stop_loss,
            self.take_profit_1,
            self.take_profit_2,
            self.take_profit_3,
            self.mtf_confirmation_percentage,
            if self.mtf_confirmation { " ✓" } else { "" },
            self.reasons.join("; "),
        )
    }
}

/// Why the dedup/rate limiter refused an emission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThrottleReason {
    IntervalNotElapsed {
        elapsed_secs: i64,
        min_interval_secs: u64,
    },
    DailyCapReached {
        emitted: u32,
        cap: u32,
    },
}

impl std::fmt::Display for ThrottleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThrottleReason::IntervalNotElapsed {
                elapsed_secs,
                min_interval_secs,
            } => write!(
                f,
                "only {elapsed_secs}s since last emission (minimum {min_interval_secs}s)"
            ),
            ThrottleReason::DailyCapReached { emitted, cap } => {
                write!(f, "daily cap reached ({emitted}/{cap})")
            }
        }
    }
}

/// The steady-state "no signal" outcomes. These are ordinary results, not
/// faults; most evaluation cycles end in one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NoSignal {
    /// Warm-up window not met for the requested series.
    InsufficientData { have: usize, need: usize },
    /// Conditions did not resolve to a direction.
    Neutral,
    /// Volatility gate rejected the evaluation.
    LowVolatility { atr_percentile: f64 },
    /// ATR was zero or negative; a stop distance cannot be derived.
    DegenerateVolatility,
    /// Dedup/rate limiter suppressed the emission.
    RateLimited(ThrottleReason),
}

impl std::fmt::Display for NoSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoSignal::InsufficientData { have, need } => {
                write!(f, "insufficient data: {have} candles, need {need}")
            }
            NoSignal::Neutral => write!(f, "no directional consensus"),
            NoSignal::LowVolatility { atr_percentile } => {
                write!(f, "low volatility: ATR at {atr_percentile:.1}th percentile")
            }
            NoSignal::DegenerateVolatility => write!(f, "degenerate volatility (ATR <= 0)"),
            NoSignal::RateLimited(reason) => write!(f, "rate limited: {reason}"),
        }
    }
}

/// Outcome of one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Signal(Box<Signal>),
    NoSignal(NoSignal),
}

impl Verdict {
    pub fn signal(&self) -> Option<&Signal> {
        match self {
            Verdict::Signal(s) => Some(s),
            Verdict::NoSignal(_) => None,
        }
    }
}
