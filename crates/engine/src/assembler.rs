use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use analysis::{ConditionScorer, IndicatorEngine};
use common::{
    pairs, Direction, Error, NoSignal, Result, Signal, SignalStatus, Timeframe, Verdict,
};
use risk::derive_levels;

use crate::config::SignalConfig;
use crate::mtf::MtfConfirmation;
use crate::proximity::{self, Proximity};
use crate::session::session_tag;
use crate::store::MarketStore;
use crate::throttle::SignalThrottle;
use crate::volatility::VolatilityGate;

/// The signal pipeline: indicators, condition scoring, volatility gating,
/// multi-timeframe confirmation, risk levels, throttling, assembly.
///
/// One evaluation reads a snapshot of the candle store and runs to completion
/// on it; a concurrent ingest can never change the data mid-pipeline. Every
/// routine "no signal this cycle" outcome comes back as `Verdict::NoSignal`;
/// `Err` is reserved for data-contract violations like an unknown pair.
pub struct SignalEngine {
    store: Arc<MarketStore>,
    cfg: SignalConfig,
    indicators: IndicatorEngine,
    scorer: ConditionScorer,
    gate: VolatilityGate,
    throttle: SignalThrottle,
}

impl SignalEngine {
    pub fn new(store: Arc<MarketStore>, cfg: SignalConfig) -> Self {
        let indicators = IndicatorEngine::new(cfg.indicators.clone());
        let scorer = ConditionScorer::new(cfg.scoring.clone());
        let gate = VolatilityGate::new(cfg.volatility.clone());
        let throttle = SignalThrottle::new(cfg.throttle.clone());
        Self { store, cfg, indicators, scorer, gate, throttle }
    }

    /// Candles required on the base timeframe before an evaluation can score
    /// (one more than indicator warm-up, for the previous snapshot).
    pub fn required_candles(&self) -> usize {
        self.indicators.warm_up() + 1
    }

    /// Run one full evaluation cycle for a (pair, timeframe).
    pub async fn evaluate(&self, pair: &str, timeframe: Timeframe) -> Result<Verdict> {
        let spec = pairs::spec(pair).ok_or_else(|| Error::UnknownPair(pair.to_string()))?;

        let candles = self.store.snapshot(pair, timeframe).await;
        let Some((previous, current)) = self.indicators.latest_pair(&candles) else {
            return Ok(Verdict::NoSignal(NoSignal::InsufficientData {
                have: candles.len(),
                need: self.required_candles(),
            }));
        };

        let outcome = self.scorer.score(&current, &previous);

        let volatility_info = self.gate.assess(&self.indicators.atr_series(&candles));
        if !volatility_info.sufficient_volatility {
            debug!(pair, %timeframe, percentile = volatility_info.atr_percentile, "volatility gated");
            return Ok(Verdict::NoSignal(NoSignal::LowVolatility {
                atr_percentile: volatility_info.atr_percentile,
            }));
        }

        let Some(direction) = outcome.direction else {
            return Ok(Verdict::NoSignal(NoSignal::Neutral));
        };

        let confirmation = self.confirm(pair, timeframe, direction).await;

        let entry_price = pairs::round_price(current.close, spec.pip_position);
        let levels = match derive_levels(
            entry_price,
            direction,
            current.atr,
            &self.cfg.risk,
            spec.pip_position,
        ) {
            Ok(levels) => levels,
            Err(_) => return Ok(Verdict::NoSignal(NoSignal::DegenerateVolatility)),
        };

        // Clock of record is the evaluated candle, not the wall clock, so a
        // replay of the same data throttles the same way.
        let timestamp = match candles.last() {
            Some(candle) => candle.open_time,
            None => return Ok(Verdict::NoSignal(NoSignal::Neutral)),
        };
        if let Err(reason) = self.throttle.admit(pair, timeframe, direction, timestamp).await {
            debug!(pair, %timeframe, %direction, %reason, "emission throttled");
            return Ok(Verdict::NoSignal(NoSignal::RateLimited(reason)));
        }

        let signal = Signal {
            id: Uuid::new_v4().to_string(),
            pair: pair.to_string(),
            timeframe,
            direction,
            strength: outcome.strength,
            entry_price,
            stop_loss: levels.stop_loss,
            take_profit_1: levels.take_profit_1,
            take_profit_2: levels.take_profit_2,
            take_profit_3: levels.take_profit_3,
            risk_reward_1: levels.risk_reward_1,
            risk_reward_2: levels.risk_reward_2,
            risk_reward_3: levels.risk_reward_3,
            reasons: outcome.reasons,
            timestamp,
            mtf_confirmation: confirmation.confirmed,
            mtf_confirmation_percentage: confirmation.percentage,
            session: session_tag(timestamp).to_string(),
            volatility_info,
            distance_pips: None,
            proximity_score: None,
            status: SignalStatus::Active,
        };

        info!(
            pair,
            %timeframe,
            %direction,
            strength = signal.strength,
            mtf = signal.mtf_confirmation_percentage,
            "signal generated"
        );
        Ok(Verdict::Signal(Box::new(signal)))
    }

    /// Re-score each higher timeframe independently and count how many
    /// resolve to the same direction. Timeframes still below warm-up abstain
    /// entirely; a Neutral resolution counts as a disagreeing vote.
    pub async fn confirm(
        &self,
        pair: &str,
        base: Timeframe,
        direction: Direction,
    ) -> MtfConfirmation {
        let mut votes = Vec::new();
        for &higher in base.confirmation_timeframes() {
            let candles = self.store.snapshot(pair, higher).await;
            if let Some((previous, current)) = self.indicators.latest_pair(&candles) {
                let outcome = self.scorer.score(&current, &previous);
                votes.push(outcome.direction == Some(direction));
            }
        }
        self.cfg.mtf.resolve(&votes)
    }

    /// Score an existing signal against the live price, stamping the distance
    /// and proximity fields onto it. Re-runnable as the price moves.
    pub fn score_proximity(&self, signal: &mut Signal, live_price: f64) -> Result<Proximity> {
        let spec =
            pairs::spec(&signal.pair).ok_or_else(|| Error::UnknownPair(signal.pair.clone()))?;
        let proximity =
            proximity::score(signal.entry_price, live_price, spec.pip_size, &self.cfg.proximity);
        signal.distance_pips = Some(proximity.distance_pips);
        signal.proximity_score = Some(proximity.proximity_score);
        Ok(proximity)
    }
}
