//! Item system: templates, catalog, and reinforcement.

pub mod catalog;
pub mod types;
pub mod upgrade;

pub use catalog::*;
pub use types::*;
pub use upgrade::*;
