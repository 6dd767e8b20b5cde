//! Character classes: base stats, per-level growth, starting gear.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Ranger,
}

impl CharacterClass {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Ranger => "Ranger",
        }
    }

    pub fn all() -> [CharacterClass; 3] {
        [
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Ranger,
        ]
    }
}

/// Base stat block granted at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassBaseStats {
    pub max_health: u32,
    pub max_mana: u32,
    pub attack: i32,
    pub defense: i32,
    pub magic_power: i32,
    pub speed: i32,
    pub critical_chance: i32,
    pub block_chance: i32,
}

/// Flat stat deltas applied once per level gained.
/// Health/mana raise the maximum; the level-up itself restores the pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelBonus {
    pub max_health: u32,
    pub max_mana: u32,
    pub attack: i32,
    pub defense: i32,
    pub magic_power: i32,
    pub speed: i32,
    pub critical_chance: i32,
}

/// Default starting equipment (weapon id, armor id).
pub fn starting_equipment(class: CharacterClass) -> (&'static str, &'static str) {
    match class {
        CharacterClass::Warrior => ("novice_sword", "leather_armor"),
        CharacterClass::Mage => ("apprentice_staff", "cloth_robes"),
        CharacterClass::Ranger => ("hunting_bow", "scout_leather"),
    }
}

pub fn base_stats(class: CharacterClass) -> ClassBaseStats {
    match class {
        CharacterClass::Warrior => ClassBaseStats {
            max_health: 100,
            max_mana: 0,
            attack: 12,
            defense: 8,
            magic_power: 0,
            speed: 8,
            critical_chance: 10,
            block_chance: 15,
        },
        CharacterClass::Mage => ClassBaseStats {
            max_health: 70,
            max_mana: 100,
            attack: 6,
            defense: 3,
            magic_power: 15,
            speed: 12,
            critical_chance: 10,
            block_chance: 5,
        },
        CharacterClass::Ranger => ClassBaseStats {
            max_health: 85,
            max_mana: 0,
            attack: 10,
            defense: 5,
            magic_power: 0,
            speed: 15,
            critical_chance: 20,
            block_chance: 5,
        },
    }
}

pub fn level_bonus(class: CharacterClass) -> LevelBonus {
    match class {
        CharacterClass::Warrior => LevelBonus {
            max_health: 15,
            attack: 3,
            defense: 2,
            speed: 1,
            ..LevelBonus::default()
        },
        CharacterClass::Mage => LevelBonus {
            max_health: 10,
            max_mana: 15,
            attack: 1,
            defense: 1,
            magic_power: 3,
            speed: 1,
            ..LevelBonus::default()
        },
        CharacterClass::Ranger => LevelBonus {
            max_health: 12,
            attack: 2,
            defense: 1,
            speed: 2,
            critical_chance: 1,
            ..LevelBonus::default()
        },
    }
}
