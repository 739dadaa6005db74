pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use atr::AtrIndicator;
pub use bollinger::{BollingerBands, BollingerIndicator};
pub use ema::ema_series;
pub use macd::{MacdIndicator, MacdOutput};
pub use rsi::RsiIndicator;
pub use sma::{rolling_std, sma};
pub use stochastic::{StochasticIndicator, StochasticOutput};
