use serde::{Deserialize, Serialize};
use tracing::warn;

use common::{pairs, Error, PairCategory, Result, Signal};

/// Account-risk bounds for position sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Risk percentage used when the caller passes an out-of-range value.
    pub default_risk_percent: f64,
    /// Hard upper bound on risk percentage.
    pub max_risk_percent: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self { default_risk_percent: 1.0, max_risk_percent: 5.0 }
    }
}

/// Position sizing derived from a signal's entry/stop and the account risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSize {
    pub pair: String,
    pub risk_percent: f64,
    /// Dollars put at risk: balance x risk_percent / 100.
    pub risk_amount: f64,
    pub pips_distance: f64,
    /// Standard lots, forex only.
    pub lot_size: Option<f64>,
    /// Base-asset units (lots x 100k for forex, whole units for commodities,
    /// fractional for crypto).
    pub units: f64,
    /// Loss if the stop is hit with this size.
    pub max_loss: f64,
}

/// Dollars per pip per standard lot for USD-quoted majors (and the JPY pip
/// size already accounts for the different quote precision).
const PIP_VALUE_PER_LOT: f64 = 10.0;
const UNITS_PER_LOT: f64 = 100_000.0;

/// Pure position-size calculation from a signal's fixed entry and stop.
///
/// `risk_amount = balance x risk_percent / 100`;
/// `pips = |entry - stop| / pip_size`;
/// forex: `lots = risk_amount / (pips x pip_value_per_lot)`;
/// commodity/crypto: `units = risk_amount / price_distance`.
pub fn size_position(
    account_balance: f64,
    risk_percent: f64,
    signal: &Signal,
    cfg: &SizingConfig,
) -> Result<PositionSize> {
    if account_balance <= 0.0 || !account_balance.is_finite() {
        return Err(Error::Other(format!(
            "account balance must be positive, got {account_balance}"
        )));
    }

    let spec = pairs::spec(&signal.pair).ok_or_else(|| Error::UnknownPair(signal.pair.clone()))?;

    let risk_percent = if risk_percent <= 0.0 || risk_percent > cfg.max_risk_percent {
        warn!(
            requested = risk_percent,
            fallback = cfg.default_risk_percent,
            "risk percent out of range, using default"
        );
        cfg.default_risk_percent
    } else {
        risk_percent
    };

    let price_distance = (signal.entry_price - signal.stop_loss).abs();
    if price_distance <= 0.0 {
        return Err(Error::Other("entry and stop loss must differ".into()));
    }

    let risk_amount = account_balance * risk_percent / 100.0;
    let pips_distance = price_distance / spec.pip_size;

    let sized = match spec.category {
        PairCategory::Forex => {
            let lots = round_lot(risk_amount / (pips_distance * PIP_VALUE_PER_LOT));
            PositionSize {
                pair: signal.pair.clone(),
                risk_percent,
                risk_amount,
                pips_distance,
                lot_size: Some(lots),
                units: (lots * UNITS_PER_LOT).round(),
                max_loss: lots * pips_distance * PIP_VALUE_PER_LOT,
            }
        }
        PairCategory::Commodity => {
            let units = (risk_amount / price_distance).round();
            PositionSize {
                pair: signal.pair.clone(),
                risk_percent,
                risk_amount,
                pips_distance,
                lot_size: None,
                units,
                max_loss: units * price_distance,
            }
        }
        PairCategory::Crypto => {
            let units = risk_amount / price_distance;
            PositionSize {
                pair: signal.pair.clone(),
                risk_percent,
                risk_amount,
                pips_distance,
                lot_size: None,
                units,
                max_loss: units * price_distance,
            }
        }
    };

    Ok(sized)
}

/// Brokers accept finer increments on small lot sizes.
fn round_lot(lots: f64) -> f64 {
    let decimals = if lots >= 1.0 {
        2
    } else if lots >= 0.1 {
        3
    } else {
        4
    };
    let factor = 10f64.powi(decimals);
    (lots * factor).round() / factor
}
