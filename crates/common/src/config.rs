use std::str::FromStr;

use crate::Timeframe;

/// Deployment-level configuration loaded from environment variables at
/// startup. Missing or invalid values cause an immediate panic with a clear
/// message; numeric tunables live in the TOML signal config instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pairs to evaluate each cycle.
    pub pairs: Vec<String>,
    /// Base timeframes to evaluate per pair.
    pub timeframes: Vec<Timeframe>,
    /// Polling cadence of the scheduler in seconds.
    pub poll_interval_secs: u64,
    /// Path to the TOML signal configuration.
    pub signal_config_path: String,
    /// Directory of candle fixtures for the replay provider.
    pub candle_data_dir: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let pairs: Vec<String> = optional_env("PAIRS")
            .unwrap_or_else(|| "EUR_USD,GBP_USD,USD_JPY,AUD_USD,USD_CAD,XAU_USD,BTC_USD".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        for pair in &pairs {
            if crate::pairs::spec(pair).is_none() {
                panic!("PAIRS contains unsupported pair '{pair}'");
            }
        }

        let timeframes: Vec<Timeframe> = optional_env("TIMEFRAMES")
            .unwrap_or_else(|| "H1,H4,D1".into())
            .split(',')
            .map(|s| {
                Timeframe::from_str(s)
                    .unwrap_or_else(|_| panic!("TIMEFRAMES contains unknown code '{}'", s.trim()))
            })
            .collect();

        Config {
            pairs,
            timeframes,
            poll_interval_secs: optional_env("POLL_INTERVAL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            signal_config_path: optional_env("SIGNAL_CONFIG_PATH")
                .unwrap_or_else(|| "config/signals.toml".to_string()),
            candle_data_dir: optional_env("CANDLE_DATA_DIR")
                .unwrap_or_else(|| "data/candles".to_string()),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
