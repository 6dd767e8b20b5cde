//! Simulation configuration.

use crate::character::class::CharacterClass;
use crate::core::scaling::EncounterContext;

/// Configuration for a bulk encounter simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of encounters to run
    pub num_runs: u32,

    /// Base random seed; run `i` uses `seed + i` for reproducibility
    pub seed: u64,

    /// Class of the simulated character
    pub class: CharacterClass,

    /// Level the character is raised to before fighting
    pub character_level: u32,

    /// Upgrade tier applied to both equipped items
    pub equipment_tier: u8,

    /// Enemy template to scale against the character each run
    pub enemy_id: String,

    /// Encounter context (difficulty multiplier)
    pub context: EncounterContext,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: 0,
            class: CharacterClass::Warrior,
            character_level: 5,
            equipment_tier: 0,
            enemy_id: "forest_wolf".to_string(),
            context: EncounterContext::ForestNormal,
        }
    }
}

impl SimConfig {
    /// Quick config for checking one matchup's balance.
    pub fn matchup(enemy_id: &str, context: EncounterContext) -> Self {
        Self {
            enemy_id: enemy_id.to_string(),
            context,
            ..Default::default()
        }
    }
}
