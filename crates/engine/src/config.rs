use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use analysis::{IndicatorConfig, ScoreConfig};
use common::{Error, Result};
use risk::{RiskLevelConfig, SizingConfig};

use crate::mtf::MtfConfig;
use crate::proximity::ProximityConfig;
use crate::throttle::ThrottleConfig;
use crate::volatility::VolatilityConfig;

/// All numeric tunables of the signal pipeline, loaded from one TOML file.
/// Every section and every field has a production default, so an empty file
/// (or no file at all) yields a fully working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub indicators: IndicatorConfig,
    pub scoring: ScoreConfig,
    pub volatility: VolatilityConfig,
    pub mtf: MtfConfig,
    pub throttle: ThrottleConfig,
    pub proximity: ProximityConfig,
    pub risk: RiskLevelConfig,
    pub sizing: SizingConfig,
    /// Candles retained per (pair, timeframe) series.
    pub series_cap: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            scoring: ScoreConfig::default(),
            volatility: VolatilityConfig::default(),
            mtf: MtfConfig::default(),
            throttle: ThrottleConfig::default(),
            proximity: ProximityConfig::default(),
            risk: RiskLevelConfig::default(),
            sizing: SizingConfig::default(),
            series_cap: 500,
        }
    }
}

impl SignalConfig {
    /// Parse a TOML signal configuration.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("invalid signal config: {e}")))
    }

    /// Load the TOML signal configuration at `path`, falling back to the
    /// defaults when the file does not exist. A file that exists but does not
    /// parse is a hard error; silently ignoring a typo'd config is worse than
    /// refusing to start.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no signal config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
