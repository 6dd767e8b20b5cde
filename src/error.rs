//! Error taxonomy for the combat core.
//!
//! Only genuinely exceptional conditions are errors. Expected in-game
//! outcomes (defeat, a failed upgrade, a failed flee) are ordinary values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown enemy template: {0}")]
    UnknownEnemyTemplate(String),

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("invalid template {id}: {reason}")]
    InvalidTemplate { id: String, reason: String },

    /// An action was submitted after the encounter reached a terminal state.
    #[error("encounter is already over")]
    EncounterOver,

    #[error("catalog parse error: {0}")]
    CatalogParse(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
