//! Enemy templates, catalog, and scaled instances.

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
