use common::Direction;
use tracing::debug;

use crate::config::ScoreConfig;
use crate::snapshot::IndicatorSnapshot;

/// Directional lean of a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

/// One evaluated condition: which way it leans, how much it counts, and the
/// human-readable reason that ends up on the signal.
#[derive(Debug, Clone)]
pub struct ConditionResult {
    pub bias: Bias,
    pub weight: f64,
    pub reason: String,
}

/// Resolved direction and normalized strength for one evaluation.
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// `None` means Neutral: no side cleared the threshold and margin.
    pub direction: Option<Direction>,
    /// Winning total normalized by the maximum achievable weight, in [0, 1].
    pub strength: f64,
    /// Reasons from the winning side, in rule order.
    pub reasons: Vec<String>,
    pub bullish_score: f64,
    pub bearish_score: f64,
}

/// Evaluates the directional trading conditions from two consecutive
/// indicator snapshots and resolves them into a direction.
#[derive(Debug, Clone)]
pub struct ConditionScorer {
    cfg: ScoreConfig,
}

impl ConditionScorer {
    pub fn new(cfg: ScoreConfig) -> Self {
        Self { cfg }
    }

    /// Evaluate every condition. Each rule is mutually exclusive between its
    /// bullish and bearish trigger; untriggered rules yield nothing.
    pub fn conditions(
        &self,
        current: &IndicatorSnapshot,
        previous: &IndicatorSnapshot,
    ) -> Vec<ConditionResult> {
        let cfg = &self.cfg;
        let mut results = Vec::new();
        let mut push = |bias: Bias, weight: f64, reason: &str| {
            results.push(ConditionResult { bias, weight, reason: reason.to_string() });
        };

        // RSI leaving an extreme zone
        if previous.rsi < cfg.rsi_oversold && current.rsi > previous.rsi {
            push(Bias::Bullish, cfg.weight_rsi, "RSI oversold recovery");
        } else if previous.rsi > cfg.rsi_overbought && current.rsi < previous.rsi {
            push(Bias::Bearish, cfg.weight_rsi, "RSI overbought decline");
        }

        // MACD histogram sign flip
        if current.macd_hist > 0.0 && previous.macd_hist <= 0.0 {
            push(Bias::Bullish, cfg.weight_macd, "MACD bullish crossover");
        } else if current.macd_hist < 0.0 && previous.macd_hist >= 0.0 {
            push(Bias::Bearish, cfg.weight_macd, "MACD bearish crossover");
        }

        // Moving-average trend filter
        if current.close > current.sma_fast && current.sma_fast > current.sma_slow {
            push(Bias::Bullish, cfg.weight_trend, "Golden configuration: price above both SMAs");
        } else if current.close < current.sma_fast && current.sma_fast < current.sma_slow {
            push(Bias::Bearish, cfg.weight_trend, "Death configuration: price below both SMAs");
        }

        // Bollinger band touch with a turn
        if current.close <= current.bollinger_lower && current.close > previous.close {
            push(Bias::Bullish, cfg.weight_bollinger, "Bounce from lower Bollinger band");
        } else if current.close >= current.bollinger_upper && current.close < previous.close {
            push(Bias::Bearish, cfg.weight_bollinger, "Rejection from upper Bollinger band");
        }

        // Stochastic cross inside an extreme zone
        if current.stochastic_k < cfg.stochastic_oversold
            && current.stochastic_k > current.stochastic_d
        {
            push(Bias::Bullish, cfg.weight_stochastic, "Stochastic bullish crossover in oversold");
        } else if current.stochastic_k > cfg.stochastic_overbought
            && current.stochastic_k < current.stochastic_d
        {
            push(Bias::Bearish, cfg.weight_stochastic, "Stochastic bearish crossover in overbought");
        }

        results
    }

    /// Sum per-direction weights and resolve. A direction wins only when its
    /// total reaches `min_score` and beats the other side by more than
    /// `margin`; anything else, ties included, is Neutral by design.
    pub fn resolve(&self, conditions: &[ConditionResult]) -> ScoreOutcome {
        let bullish_score: f64 = conditions
            .iter()
            .filter(|c| c.bias == Bias::Bullish)
            .map(|c| c.weight)
            .sum();
        let bearish_score: f64 = conditions
            .iter()
            .filter(|c| c.bias == Bias::Bearish)
            .map(|c| c.weight)
            .sum();

        let (direction, winning, bias) =
            if bullish_score >= self.cfg.min_score && bullish_score > bearish_score + self.cfg.margin {
                (Some(Direction::Buy), bullish_score, Bias::Bullish)
            } else if bearish_score >= self.cfg.min_score
                && bearish_score > bullish_score + self.cfg.margin
            {
                (Some(Direction::Sell), bearish_score, Bias::Bearish)
            } else {
                (None, 0.0, Bias::Neutral)
            };

        let strength = if direction.is_some() {
            (winning / self.cfg.max_weight()).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let reasons: Vec<String> = conditions
            .iter()
            .filter(|c| c.bias == bias)
            .map(|c| c.reason.clone())
            .collect();

        debug!(bullish = bullish_score, bearish = bearish_score, ?direction, "conditions resolved");

        ScoreOutcome { direction, strength, reasons, bullish_score, bearish_score }
    }

    /// Evaluate and resolve in one call.
    pub fn score(
        &self,
        current: &IndicatorSnapshot,
        previous: &IndicatorSnapshot,
    ) -> ScoreOutcome {
        self.resolve(&self.conditions(current, previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A snapshot with every rule quiet: mid-range oscillators, no trend,
    /// close inside the bands.
    fn quiet() -> IndicatorSnapshot {
        IndicatorSnapshot {
            close: 1.0900,
            rsi: 50.0,
            macd: 0.0,
            macd_signal: 0.0,
            macd_hist: 0.0005,
            sma_fast: 1.0910,
            sma_slow: 1.0890,
            atr: 0.0020,
            stochastic_k: 50.0,
            stochastic_d: 50.0,
            bollinger_upper: 1.1000,
            bollinger_lower: 1.0800,
        }
    }

    #[test]
    fn oversold_recovery_with_macd_flip_and_trend_yields_buy() {
        let scorer = ConditionScorer::new(ScoreConfig::default());
        let previous = IndicatorSnapshot { rsi: 25.0, macd_hist: -0.0002, close: 1.0880, ..quiet() };
        let current = IndicatorSnapshot {
            rsi: 33.0,
            macd_hist: 0.0001,
            close: 1.0920,   // above sma_fast 1.0910 > sma_slow 1.0890
            ..quiet()
        };

        let outcome = scorer.score(&current, &previous);
        assert_eq!(outcome.direction, Some(Direction::Buy));
        assert!(outcome.reasons.iter().any(|r| r == "RSI oversold recovery"));
        assert!(outcome.reasons.iter().any(|r| r == "MACD bullish crossover"));
        // RSI 2 + MACD 2 + trend 3 = 7 of 9
        assert!((outcome.bullish_score - 7.0).abs() < 1e-9);
        assert!((outcome.strength - 7.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn overbought_decline_mirror_yields_sell() {
        let scorer = ConditionScorer::new(ScoreConfig::default());
        let previous = IndicatorSnapshot { rsi: 75.0, macd_hist: 0.0002, close: 1.0930, ..quiet() };
        let current = IndicatorSnapshot {
            rsi: 66.0,
            macd_hist: -0.0001,
            close: 1.0850,   // below sma_fast; sma_fast below sma_slow
            sma_fast: 1.0870,
            sma_slow: 1.0890,
            ..quiet()
        };

        let outcome = scorer.score(&current, &previous);
        assert_eq!(outcome.direction, Some(Direction::Sell));
        assert!(outcome.reasons.iter().any(|r| r == "RSI overbought decline"));
        assert!(outcome.reasons.iter().any(|r| r == "MACD bearish crossover"));
    }

    #[test]
    fn weak_single_condition_is_neutral() {
        let scorer = ConditionScorer::new(ScoreConfig::default());
        // Only the stochastic rule fires: weight 1 < min_score 3
        let previous = quiet();
        let current = IndicatorSnapshot {
            close: 1.0905,
            sma_fast: 1.0910, // close below fast SMA, no trend condition
            stochastic_k: 15.0,
            stochastic_d: 10.0,
            ..quiet()
        };
        let outcome = scorer.score(&current, &previous);
        assert_eq!(outcome.direction, None);
        assert_eq!(outcome.strength, 0.0);
    }

    #[test]
    fn balanced_scores_resolve_to_neutral() {
        // Equal weights on both sides must never emit a direction.
        let cfg = ScoreConfig { min_score: 1.0, ..ScoreConfig::default() };
        let scorer = ConditionScorer::new(cfg);
        let conditions = vec![
            ConditionResult { bias: Bias::Bullish, weight: 2.0, reason: "a".into() },
            ConditionResult { bias: Bias::Bearish, weight: 2.0, reason: "b".into() },
        ];
        let outcome = scorer.resolve(&conditions);
        assert_eq!(outcome.direction, None);
    }

    #[test]
    fn margin_suppresses_narrow_wins() {
        let cfg = ScoreConfig { min_score: 1.0, margin: 1.5, ..ScoreConfig::default() };
        let scorer = ConditionScorer::new(cfg);
        let conditions = vec![
            ConditionResult { bias: Bias::Bullish, weight: 3.0, reason: "a".into() },
            ConditionResult { bias: Bias::Bearish, weight: 2.0, reason: "b".into() },
        ];
        // 3.0 does not beat 2.0 by more than 1.5
        assert_eq!(scorer.resolve(&conditions).direction, None);
    }

    #[test]
    fn strength_is_clamped_to_unit_interval() {
        let cfg = ScoreConfig { min_score: 0.5, ..ScoreConfig::default() };
        let scorer = ConditionScorer::new(cfg);
        let conditions = vec![ConditionResult {
            bias: Bias::Bullish,
            weight: 42.0, // over-weighted on purpose
            reason: "x".into(),
        }];
        let outcome = scorer.resolve(&conditions);
        assert_eq!(outcome.strength, 1.0);
    }

    #[test]
    fn reasons_only_come_from_the_winning_side() {
        let cfg = ScoreConfig { min_score: 1.0, ..ScoreConfig::default() };
        let scorer = ConditionScorer::new(cfg);
        let conditions = vec![
            ConditionResult { bias: Bias::Bullish, weight: 5.0, reason: "bull".into() },
            ConditionResult { bias: Bias::Bearish, weight: 1.0, reason: "bear".into() },
        ];
        let outcome = scorer.resolve(&conditions);
        assert_eq!(outcome.reasons, vec!["bull".to_string()]);
    }
}
