use serde::{Deserialize, Serialize};

/// Multi-timeframe confirmation tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MtfConfig {
    /// Share of usable higher timeframes that must agree, 0-100.
    pub threshold_pct: f64,
    /// Whether confirmation counts as passed when no higher timeframe has
    /// enough data to vote at all.
    pub pass_when_no_data: bool,
}

impl Default for MtfConfig {
    fn default() -> Self {
        Self { threshold_pct: 60.0, pass_when_no_data: false }
    }
}

/// Confirmation outcome attached to a signal. Informational metadata, never
/// a gate: a signal is published either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MtfConfirmation {
    pub confirmed: bool,
    /// Agreeing share of the usable higher timeframes, 0-100.
    pub percentage: f64,
    /// Higher timeframes that had enough data to vote.
    pub considered: usize,
}

impl MtfConfig {
    /// Resolve one vote per usable higher timeframe into a confirmation.
    /// Timeframes without enough data never reach this point; with no votes
    /// at all the `pass_when_no_data` knob decides.
    pub fn resolve(&self, votes: &[bool]) -> MtfConfirmation {
        if votes.is_empty() {
            return MtfConfirmation {
                confirmed: self.pass_when_no_data,
                percentage: 0.0,
                considered: 0,
            };
        }
        let agreeing = votes.iter().filter(|v| **v).count();
        let percentage = agreeing as f64 / votes.len() as f64 * 100.0;
        MtfConfirmation {
            confirmed: percentage >= self.threshold_pct,
            percentage,
            considered: votes.len(),
        }
    }
}
