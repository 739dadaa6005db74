use serde::{Deserialize, Serialize};

/// Instrument class, which decides how positions are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairCategory {
    Forex,
    Commodity,
    Crypto,
}

/// Static per-pair metadata: pip geometry and instrument class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSpec {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Smallest standard price increment (0.01 for JPY-quoted and gold).
    pub pip_size: f64,
    /// Decimal places prices are quoted to for this pair.
    pub pip_position: u32,
    pub category: PairCategory,
}

/// Supported instruments. The engine refuses pairs outside this catalog
/// rather than guessing a pip size.
pub const PAIRS: &[PairSpec] = &[
    PairSpec { symbol: "EUR_USD", name: "EUR/USD", pip_size: 0.0001, pip_position: 4, category: PairCategory::Forex },
    PairSpec { symbol: "GBP_USD", name: "GBP/USD", pip_size: 0.0001, pip_position: 4, category: PairCategory::Forex },
    PairSpec { symbol: "USD_JPY", name: "USD/JPY", pip_size: 0.01, pip_position: 2, category: PairCategory::Forex },
    PairSpec { symbol: "AUD_USD", name: "AUD/USD", pip_size: 0.0001, pip_position: 4, category: PairCategory::Forex },
    PairSpec { symbol: "USD_CAD", name: "USD/CAD", pip_size: 0.0001, pip_position: 4, category: PairCategory::Forex },
    PairSpec { symbol: "XAU_USD", name: "Gold/USD", pip_size: 0.01, pip_position: 2, category: PairCategory::Commodity },
    PairSpec { symbol: "BTC_USD", name: "Bitcoin/USD", pip_size: 1.0, pip_position: 0, category: PairCategory::Crypto },
];

pub fn spec(symbol: &str) -> Option<&'static PairSpec> {
    PAIRS.iter().find(|p| p.symbol == symbol)
}

/// Round a price to the pair's quoted precision.
pub fn round_price(value: f64, pip_position: u32) -> f64 {
    let factor = 10f64.powi(pip_position as i32);
    (value * factor).round() / factor
}
