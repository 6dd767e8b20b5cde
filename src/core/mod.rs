//! Combat core: balance constants, damage math, scaling, and the engine.

pub mod balance;
pub mod combat_math;
pub mod engine;
pub mod scaling;

pub use combat_math::*;
pub use engine::*;
pub use scaling::*;
