pub mod levels;
pub mod position;

pub use levels::{derive_levels, LevelError, RiskLevelConfig, RiskLevels};
pub use position::{size_position, PositionSize, SizingConfig};
