//! Equipment and consumable catalog.
//!
//! Static template data behind a trait so the engine and aggregator never
//! care where the tables came from. The in-memory implementation validates
//! on insert.

use std::collections::HashMap;

use crate::character::CharacterClass;
use crate::error::{CoreError, Result};
use crate::items::types::{
    BuffStat, ConsumableEffect, ConsumableTemplate, EquipmentKind, EquipmentStats,
    EquipmentTemplate, Quality, SpecialEffect,
};

pub trait ItemCatalog {
    fn equipment(&self, id: &str) -> Result<&EquipmentTemplate>;
    fn consumable(&self, id: &str) -> Result<&ConsumableTemplate>;
}

#[derive(Debug, Default)]
pub struct InMemoryItemCatalog {
    equipment: HashMap<String, EquipmentTemplate>,
    consumables: HashMap<String, ConsumableTemplate>,
}

impl InMemoryItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the stock armory and potion shelf.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for template in default_equipment() {
            if let Err(err) = catalog.insert_equipment(template) {
                unreachable!("stock equipment template rejected: {err}");
            }
        }
        for template in default_consumables() {
            if let Err(err) = catalog.insert_consumable(template) {
                unreachable!("stock consumable template rejected: {err}");
            }
        }
        catalog
    }

    pub fn insert_equipment(&mut self, template: EquipmentTemplate) -> Result<()> {
        if template.id.is_empty() {
            return Err(CoreError::InvalidTemplate {
                id: template.id,
                reason: "empty id".to_string(),
            });
        }
        if template.level_requirement < 1 {
            return Err(CoreError::InvalidTemplate {
                id: template.id,
                reason: "level_requirement must be at least 1".to_string(),
            });
        }
        self.equipment.insert(template.id.clone(), template);
        Ok(())
    }

    pub fn insert_consumable(&mut self, template: ConsumableTemplate) -> Result<()> {
        if template.id.is_empty() {
            return Err(CoreError::InvalidTemplate {
                id: template.id,
                reason: "empty id".to_string(),
            });
        }
        if template.effects.is_empty() {
            return Err(CoreError::InvalidTemplate {
                id: template.id,
                reason: "consumable has no effects".to_string(),
            });
        }
        self.consumables.insert(template.id.clone(), template);
        Ok(())
    }

    /// Load equipment templates from a JSON array.
    pub fn load_equipment_json(&mut self, json: &str) -> Result<()> {
        let templates: Vec<EquipmentTemplate> =
            serde_json::from_str(json).map_err(|e| CoreError::CatalogParse(e.to_string()))?;
        for template in templates {
            self.insert_equipment(template)?;
        }
        Ok(())
    }

    /// Load consumable templates from a JSON array.
    pub fn load_consumables_json(&mut self, json: &str) -> Result<()> {
        let templates: Vec<ConsumableTemplate> =
            serde_json::from_str(json).map_err(|e| CoreError::CatalogParse(e.to_string()))?;
        for template in templates {
            self.insert_consumable(template)?;
        }
        Ok(())
    }
}

impl ItemCatalog for InMemoryItemCatalog {
    fn equipment(&self, id: &str) -> Result<&EquipmentTemplate> {
        self.equipment
            .get(id)
            .ok_or_else(|| CoreError::UnknownItem(id.to_string()))
    }

    fn consumable(&self, id: &str) -> Result<&ConsumableTemplate> {
        self.consumables
            .get(id)
            .ok_or_else(|| CoreError::UnknownItem(id.to_string()))
    }
}

fn equipment(
    id: &str,
    name: &str,
    kind: EquipmentKind,
    class: CharacterClass,
    level: u32,
    stats: EquipmentStats,
    quality: Quality,
    price: u32,
) -> EquipmentTemplate {
    EquipmentTemplate {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        class_restriction: class,
        level_requirement: level,
        base_stats: stats,
        special_effects: Vec::new(),
        quality,
        max_upgrade_tier: crate::items::upgrade::MAX_UPGRADE_TIER,
        base_price: price,
    }
}

fn default_equipment() -> Vec<EquipmentTemplate> {
    use CharacterClass::*;
    use EquipmentKind::*;

    let mut items = vec![
        // Warrior
        equipment(
            "novice_sword",
            "Novice Sword",
            Weapon,
            Warrior,
            1,
            EquipmentStats {
                attack: 25,
                ..Default::default()
            },
            Quality::Common,
            100,
        ),
        equipment(
            "knight_sword",
            "Knight's Sword",
            Weapon,
            Warrior,
            5,
            EquipmentStats {
                attack: 55,
                critical_chance: 5,
                ..Default::default()
            },
            Quality::Uncommon,
            600,
        ),
        equipment(
            "leather_armor",
            "Leather Armor",
            Armor,
            Warrior,
            1,
            EquipmentStats {
                defense: 20,
                speed: -2,
                ..Default::default()
            },
            Quality::Common,
            150,
        ),
        equipment(
            "chainmail",
            "Chainmail",
            Armor,
            Warrior,
            5,
            EquipmentStats {
                defense: 45,
                block_chance: 5,
                speed: -3,
                ..Default::default()
            },
            Quality::Uncommon,
            800,
        ),
        // Mage
        equipment(
            "apprentice_staff",
            "Apprentice Staff",
            Weapon,
            Mage,
            1,
            EquipmentStats {
                magic_power: 30,
                max_mana: 20,
                ..Default::default()
            },
            Quality::Common,
            120,
        ),
        equipment(
            "cloth_robes",
            "Cloth Robes",
            Armor,
            Mage,
            1,
            EquipmentStats {
                defense: 15,
                max_mana: 30,
                speed: 2,
                ..Default::default()
            },
            Quality::Common,
            100,
        ),
        // Ranger
        equipment(
            "hunting_bow",
            "Hunting Bow",
            Weapon,
            Ranger,
            1,
            EquipmentStats {
                attack: 22,
                speed: 8,
                ..Default::default()
            },
            Quality::Common,
            110,
        ),
        equipment(
            "elven_bow",
            "Elven Bow",
            Weapon,
            Ranger,
            5,
            EquipmentStats {
                attack: 50,
                speed: 15,
                critical_chance: 12,
                ..Default::default()
            },
            Quality::Uncommon,
            650,
        ),
        equipment(
            "scout_leather",
            "Scout Leather",
            Armor,
            Ranger,
            1,
            EquipmentStats {
                defense: 18,
                speed: 5,
                dodge_chance: 5,
                ..Default::default()
            },
            Quality::Common,
            130,
        ),
    ];

    // Flavor effects on the uncommon tier
    if let Some(sword) = items.iter_mut().find(|i| i.id == "knight_sword") {
        sword.special_effects.push(SpecialEffect {
            name: "crit_bonus".to_string(),
            value: 10,
            description: "+10% critical strike".to_string(),
        });
    }
    if let Some(bow) = items.iter_mut().find(|i| i.id == "elven_bow") {
        bow.special_effects.push(SpecialEffect {
            name: "precision".to_string(),
            value: 10,
            description: "+10% precision".to_string(),
        });
    }

    items
}

fn consumable(
    id: &str,
    name: &str,
    level: u32,
    effects: Vec<ConsumableEffect>,
    price: u32,
) -> ConsumableTemplate {
    ConsumableTemplate {
        id: id.to_string(),
        name: name.to_string(),
        level_requirement: level,
        effects,
        price,
    }
}

fn default_consumables() -> Vec<ConsumableTemplate> {
    use ConsumableEffect::*;

    vec![
        consumable(
            "small_health_potion",
            "Small Health Potion",
            1,
            vec![RestoreHealth(50)],
            30,
        ),
        consumable("health_potion", "Health Potion", 1, vec![RestoreHealth(100)], 50),
        consumable(
            "greater_health_potion",
            "Greater Health Potion",
            3,
            vec![RestoreHealth(200)],
            120,
        ),
        consumable(
            "small_mana_potion",
            "Small Mana Potion",
            1,
            vec![RestoreMana(30)],
            25,
        ),
        consumable("mana_potion", "Mana Potion", 1, vec![RestoreMana(60)], 45),
        consumable("magic_scroll", "Magic Scroll", 4, vec![RestoreAllMana], 200),
        consumable("bread", "Bread", 1, vec![RestoreHealth(20)], 10),
        consumable(
            "strength_potion",
            "Strength Potion",
            2,
            vec![Buff {
                stat: BuffStat::Attack,
                delta: 10,
                turns: 5,
            }],
            80,
        ),
        consumable(
            "defense_potion",
            "Defense Potion",
            2,
            vec![Buff {
                stat: BuffStat::Defense,
                delta: 8,
                turns: 5,
            }],
            70,
        ),
        consumable(
            "troll_blood_brew",
            "Troll Blood Brew",
            3,
            vec![Regeneration {
                per_turn: 5,
                turns: 4,
            }],
            95,
        ),
    ]
}
