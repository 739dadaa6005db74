use serde::{Deserialize, Serialize};

/// Candle timeframes supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
}

impl Timeframe {
    pub fn minutes(&self) -> u32 {
        match self {
            Timeframe::M15 => 15,
            Timeframe::M30 => 30,
            Timeframe::H1 => 60,
            Timeframe::H4 => 240,
            Timeframe::D1 => 1440,
            Timeframe::W1 => 10_080,
        }
    }

    /// Higher timeframes consulted for confirmation of this one.
    pub fn confirmation_timeframes(&self) -> &'static [Timeframe] {
        match self {
            Timeframe::M15 => &[Timeframe::M30, Timeframe::H1],
            Timeframe::M30 => &[Timeframe::H1, Timeframe::H4],
            Timeframe::H1 => &[Timeframe::H4, Timeframe::D1],
            Timeframe::H4 => &[Timeframe::D1, Timeframe::W1],
            Timeframe::D1 => &[Timeframe::W1],
            Timeframe::W1 => &[],
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D1 => "D1",
            Timeframe::W1 => "W1",
        };
        write!(f, "{code}")
    }
}

impl std::str::FromStr for Timeframe {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M15" => Ok(Timeframe::M15),
            "M30" => Ok(Timeframe::M30),
            "H1" => Ok(Timeframe::H1),
            "H4" => Ok(Timeframe::H4),
            "D1" => Ok(Timeframe::D1),
            "W1" => Ok(Timeframe::W1),
            other => Err(crate::Error::Config(format!("unknown timeframe '{other}'"))),
        }
    }
}
