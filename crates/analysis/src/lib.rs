pub mod config;
pub mod indicators;
pub mod scorer;
pub mod snapshot;

pub use config::{IndicatorConfig, ScoreConfig};
pub use scorer::{Bias, ConditionResult, ConditionScorer, ScoreOutcome};
pub use snapshot::{IndicatorEngine, IndicatorSnapshot};
