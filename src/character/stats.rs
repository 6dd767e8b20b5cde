//! Effective stat aggregation.
//!
//! Everything downstream of the character record (power estimation,
//! scaling, the engine itself) reads stats through [`effective_stats`],
//! never the raw record, so equipment bonuses apply exactly once.

use serde::{Deserialize, Serialize};

use crate::character::types::Character;
use crate::error::Result;
use crate::items::catalog::ItemCatalog;
use crate::items::types::EquipmentStats;

/// A character's combat-effective stats: base plus both equipped items'
/// tier-scaled contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBundle {
    pub max_health: u32,
    pub max_mana: u32,
    pub attack: i32,
    pub defense: i32,
    pub magic_power: i32,
    pub speed: i32,
    pub critical_chance: i32,
    pub block_chance: i32,
    pub dodge_chance: i32,
}

impl StatBundle {
    fn add_equipment(&mut self, stats: &EquipmentStats) {
        self.attack += stats.attack;
        self.defense += stats.defense;
        self.magic_power += stats.magic_power;
        self.speed += stats.speed;
        self.critical_chance += stats.critical_chance;
        self.block_chance += stats.block_chance;
        self.dodge_chance += stats.dodge_chance;
        // Equipment health/mana raise the maximum only; current pools are
        // left alone and never auto-reduced if the maximum later drops.
        if stats.max_health > 0 {
            self.max_health += stats.max_health as u32;
        }
        if stats.max_mana > 0 {
            self.max_mana += stats.max_mana as u32;
        }
    }
}

/// Combine base stats with weapon and armor contributions at their
/// current upgrade tiers.
pub fn effective_stats(character: &Character, catalog: &impl ItemCatalog) -> Result<StatBundle> {
    let mut bundle = StatBundle {
        max_health: character.max_health,
        max_mana: character.max_mana,
        attack: character.attack,
        defense: character.defense,
        magic_power: character.magic_power,
        speed: character.speed,
        critical_chance: character.critical_chance,
        block_chance: character.block_chance,
        dodge_chance: 0,
    };

    let weapon = catalog.equipment(&character.weapon.item_id)?;
    bundle.add_equipment(&weapon.base_stats.at_tier(character.weapon.tier));

    let armor = catalog.equipment(&character.armor.item_id)?;
    bundle.add_equipment(&armor.base_stats.at_tier(character.armor.tier));

    Ok(bundle)
}
