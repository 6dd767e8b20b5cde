//! Equipment and consumable templates.
//!
//! Templates are immutable catalog data; the only mutable per-instance
//! state is the upgrade tier carried by an [`EquippedItem`].

use serde::{Deserialize, Serialize};

use crate::character::class::CharacterClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Weapon,
    Armor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Quality {
    pub fn name(&self) -> &'static str {
        match self {
            Quality::Common => "Common",
            Quality::Uncommon => "Uncommon",
            Quality::Rare => "Rare",
            Quality::Epic => "Epic",
            Quality::Legendary => "Legendary",
        }
    }
}

/// Base stat bundle carried by an equipment template.
///
/// Values may be negative (heavy armor trades speed for defense).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentStats {
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub max_health: i32,
    #[serde(default)]
    pub max_mana: i32,
    #[serde(default)]
    pub magic_power: i32,
    #[serde(default)]
    pub critical_chance: i32,
    #[serde(default)]
    pub block_chance: i32,
    #[serde(default)]
    pub dodge_chance: i32,
}

/// Per-stat upgrade scaling: `base × (1 + 0.15 × tier)`, truncated.
/// Tier 0 returns the base unchanged.
pub fn scaled_stat(base: i32, tier: u8) -> i32 {
    if tier == 0 {
        return base;
    }
    let multiplier = 1.0 + 0.15 * tier as f64;
    (base as f64 * multiplier) as i32
}

impl EquipmentStats {
    /// The stat bundle this item contributes at the given upgrade tier.
    pub fn at_tier(&self, tier: u8) -> EquipmentStats {
        if tier == 0 {
            return *self;
        }
        EquipmentStats {
            attack: scaled_stat(self.attack, tier),
            defense: scaled_stat(self.defense, tier),
            speed: scaled_stat(self.speed, tier),
            max_health: scaled_stat(self.max_health, tier),
            max_mana: scaled_stat(self.max_mana, tier),
            magic_power: scaled_stat(self.magic_power, tier),
            critical_chance: scaled_stat(self.critical_chance, tier),
            block_chance: scaled_stat(self.block_chance, tier),
            dodge_chance: scaled_stat(self.dodge_chance, tier),
        }
    }
}

/// Cosmetic/flavor bonus descriptor. Not consulted by combat math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialEffect {
    pub name: String,
    pub value: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentTemplate {
    pub id: String,
    pub name: String,
    pub kind: EquipmentKind,
    pub class_restriction: CharacterClass,
    pub level_requirement: u32,
    pub base_stats: EquipmentStats,
    #[serde(default)]
    pub special_effects: Vec<SpecialEffect>,
    pub quality: Quality,
    #[serde(default = "default_max_tier")]
    pub max_upgrade_tier: u8,
    #[serde(default)]
    pub base_price: u32,
}

fn default_max_tier() -> u8 {
    crate::items::upgrade::MAX_UPGRADE_TIER
}

impl EquipmentTemplate {
    pub fn usable_at(&self, character_level: u32) -> bool {
        character_level >= self.level_requirement
    }
}

/// A reference to an equipped item: template id plus its upgrade tier.
/// The tier is the only mutable per-instance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item_id: String,
    #[serde(default)]
    pub tier: u8,
}

impl EquippedItem {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            tier: 0,
        }
    }
}

/// Instantaneous or duration-based effect declared by a consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumableEffect {
    RestoreHealth(u32),
    RestoreMana(u32),
    RestoreAllMana,
    /// Temporary stat buff, e.g. a strength potion: +delta for `turns` turns.
    Buff {
        stat: BuffStat,
        delta: i32,
        turns: u32,
    },
    /// Periodic heal (healing salve style).
    Regeneration {
        per_turn: u32,
        turns: u32,
    },
}

/// Stats a duration buff can modify mid-combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffStat {
    Attack,
    Defense,
    Speed,
    MagicPower,
    CriticalChance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumableTemplate {
    pub id: String,
    pub name: String,
    #[serde(default = "one")]
    pub level_requirement: u32,
    pub effects: Vec<ConsumableEffect>,
    #[serde(default)]
    pub price: u32,
}

fn one() -> u32 {
    1
}
