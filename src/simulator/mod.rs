//! Balance simulator.
//!
//! Runs batches of seeded encounters through the real engine and scaler,
//! so the numbers it reports are the numbers live combat produces.

pub mod config;
pub mod report;
pub mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, run_simulation_with};
