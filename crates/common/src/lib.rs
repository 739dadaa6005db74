pub mod config;
pub mod error;
pub mod pairs;
pub mod provider;
pub mod timeframe;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use pairs::{PairCategory, PairSpec};
pub use provider::{CandleProvider, SignalSink};
pub use timeframe::Timeframe;
pub use types::*;
