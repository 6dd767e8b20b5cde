//! Character model: classes, combat record, stat aggregation, leveling.

pub mod class;
pub mod progression;
pub mod stats;
pub mod types;

pub use class::*;
pub use progression::*;
pub use stats::*;
pub use types::*;
