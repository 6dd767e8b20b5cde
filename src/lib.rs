//! Saga - combat and balance resolution core for a turn-based RPG.
//!
//! This crate is the deterministic heart of the game: effective stat
//! aggregation, equipment reinforcement, power estimation, player-relative
//! enemy scaling, and turn-based encounter resolution. It does no I/O and
//! owns no persistence; all randomness is injected by the caller.

pub mod character;
pub mod core;
pub mod enemies;
pub mod error;
pub mod items;
pub mod simulator;

pub use error::{CoreError, Result};
