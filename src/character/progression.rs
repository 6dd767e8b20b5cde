//! Experience and leveling.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::character::class;
use crate::character::types::Character;
use crate::core::balance::{next_experience_threshold, MAX_LEVEL};

/// Outcome of applying an experience grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceGain {
    pub gained: u64,
    pub old_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
}

/// Add experience, resolving every level-up it funds in one pass. A big
/// grant can cross several thresholds; each level applies the class
/// growth deltas and fully restores health and mana to the new maximums.
/// Experience stops accumulating level-ups at the cap.
pub fn add_experience(character: &mut Character, amount: u64) -> ExperienceGain {
    character.experience += amount;

    let old_level = character.level;
    let mut levels_gained = 0;

    while character.experience >= character.experience_needed && character.level < MAX_LEVEL {
        level_up(character);
        levels_gained += 1;
    }

    if levels_gained > 0 {
        info!(
            name = %character.name,
            old_level,
            new_level = character.level,
            "character leveled up"
        );
    }

    ExperienceGain {
        gained: amount,
        old_level,
        new_level: character.level,
        levels_gained,
    }
}

fn level_up(character: &mut Character) {
    character.experience -= character.experience_needed;
    character.level += 1;
    character.experience_needed = next_experience_threshold(character.experience_needed);

    let bonus = class::level_bonus(character.class);
    character.max_health += bonus.max_health;
    character.max_mana += bonus.max_mana;
    character.attack += bonus.attack;
    character.defense += bonus.defense;
    character.magic_power += bonus.magic_power;
    character.speed += bonus.speed;
    character.critical_chance += bonus.critical_chance;

    // Full restore on level-up
    character.health = character.max_health;
    character.mana = character.max_mana;
}
