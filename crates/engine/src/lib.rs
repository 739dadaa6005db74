pub mod assembler;
pub mod config;
pub mod mtf;
pub mod proximity;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod throttle;
pub mod volatility;

pub use assembler::SignalEngine;
pub use config::SignalConfig;
pub use mtf::{MtfConfig, MtfConfirmation};
pub use proximity::{Proximity, ProximityConfig};
pub use scheduler::Scheduler;
pub use store::{CandleSeries, MarketStore};
pub use throttle::{SignalThrottle, ThrottleConfig};
pub use volatility::{VolatilityConfig, VolatilityGate};
