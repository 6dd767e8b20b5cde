//! Enemy templates and scaled combat instances.

use serde::{Deserialize, Serialize};

use crate::core::balance;
use crate::error::{CoreError, Result};

/// AI disposition. Drives both the scaler's stat modifiers and the
/// per-turn action policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    Aggressive,
    Defensive,
    Balanced,
    Berserker,
    Coward,
}

/// Broad enemy class, used for material drop bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyCategory {
    #[default]
    Normal,
    MiniBoss,
    Boss,
    Dragon,
}

/// Special abilities an enemy may roll on its turn.
///
/// Only `PoisonBite` and `Regeneration` carry their own mechanics; the
/// rest are flavor tags that resolve as a plain attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAbility {
    PoisonBite,
    Regeneration,
    Howl,
    WebTrap,
    Charge,
    SneakAttack,
    BoneThrow,
    LifeDrain,
    Fireball,
    ShieldBash,
}

impl SpecialAbility {
    pub fn name(&self) -> &'static str {
        match self {
            SpecialAbility::PoisonBite => "poison bite",
            SpecialAbility::Regeneration => "regeneration",
            SpecialAbility::Howl => "howl",
            SpecialAbility::WebTrap => "web trap",
            SpecialAbility::Charge => "charge",
            SpecialAbility::SneakAttack => "sneak attack",
            SpecialAbility::BoneThrow => "bone throw",
            SpecialAbility::LifeDrain => "life drain",
            SpecialAbility::Fireball => "fireball",
            SpecialAbility::ShieldBash => "shield bash",
        }
    }
}

/// One entry in a template's loot table. Entries roll independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item_id: String,
    pub chance: f64,
}

/// Immutable catalog data describing an enemy before scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub behavior: Behavior,
    #[serde(default)]
    pub category: EnemyCategory,
    pub max_health: u32,
    pub attack: i32,
    pub defense: i32,
    #[serde(default)]
    pub magic_power: i32,
    pub speed: i32,
    #[serde(default)]
    pub critical_chance: i32,
    #[serde(default)]
    pub block_chance: i32,
    #[serde(default)]
    pub special_abilities: Vec<SpecialAbility>,
    /// Percent magic damage reduction, 0..=100.
    #[serde(default)]
    pub magic_resistance: i32,
    /// Percent physical damage reduction, 0..=100.
    #[serde(default)]
    pub physical_resistance: i32,
    pub experience_reward: u64,
    pub gold_min: u64,
    pub gold_max: u64,
    #[serde(default)]
    pub loot_table: Vec<LootEntry>,
}

impl EnemyTemplate {
    /// Catalog insert-time validation. Malformed templates are rejected
    /// before they can reach a fight.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| CoreError::InvalidTemplate {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.is_empty() {
            return Err(invalid("empty id"));
        }
        if self.level < 1 {
            return Err(invalid("level must be at least 1"));
        }
        if self.max_health == 0 {
            return Err(invalid("max_health must be positive"));
        }
        if !(0..=100).contains(&self.magic_resistance) {
            return Err(invalid("magic_resistance outside 0..=100"));
        }
        if !(0..=100).contains(&self.physical_resistance) {
            return Err(invalid("physical_resistance outside 0..=100"));
        }
        if self.gold_min > self.gold_max {
            return Err(invalid("gold_min exceeds gold_max"));
        }
        for entry in &self.loot_table {
            if !(0.0..=1.0).contains(&entry.chance) {
                return Err(invalid("loot chance outside 0..=1"));
            }
        }
        Ok(())
    }
}

/// A live, player-scaled enemy. Created by the scaler, discarded after
/// the encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub level: u32,
    pub behavior: Behavior,
    pub category: EnemyCategory,
    pub max_health: u32,
    pub health: u32,
    pub attack: i32,
    pub defense: i32,
    pub magic_power: i32,
    pub speed: i32,
    pub critical_chance: i32,
    pub block_chance: i32,
    pub special_abilities: Vec<SpecialAbility>,
    pub magic_resistance: i32,
    pub physical_resistance: i32,
    pub experience_reward: u64,
    pub gold_min: u64,
    pub gold_max: u64,
    pub loot_table: Vec<LootEntry>,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage after resistance reduction, returning the actual
    /// amount taken. A resisted hit still deals at least 1.
    pub fn take_damage(&mut self, damage: u32, magic: bool) -> u32 {
        let resistance = if magic {
            self.magic_resistance
        } else {
            self.physical_resistance
        };
        let actual = crate::core::combat_math::apply_resistance(damage, resistance);
        self.health = self.health.saturating_sub(actual);
        actual
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        let old = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - old
    }

    pub fn health_percent(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64 * 100.0
    }

    /// Percent chance to reach for an ability this turn. Wounded enemies
    /// lean on their abilities harder.
    pub fn ability_chance(&self) -> i32 {
        balance::ability_chance_for_health(self.health, self.max_health)
    }
}
