//! Enemy template catalog.
//!
//! Templates are static data injected into the scaler and engine. The
//! in-memory implementation validates every template on insert, so a
//! malformed entry fails at load time rather than mid-fight.

use std::collections::HashMap;

use crate::enemies::types::{Behavior, EnemyCategory, EnemyTemplate, LootEntry, SpecialAbility};
use crate::error::{CoreError, Result};

pub trait EnemyCatalog {
    fn get(&self, id: &str) -> Result<&EnemyTemplate>;
    fn ids(&self) -> Vec<&str>;
}

#[derive(Debug, Default)]
pub struct InMemoryEnemyCatalog {
    templates: HashMap<String, EnemyTemplate>,
}

impl InMemoryEnemyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the stock bestiary.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for template in default_templates() {
            // Stock templates are known-valid; a panic here is a bug in
            // the table itself, caught by tests.
            if let Err(err) = catalog.insert(template) {
                unreachable!("stock enemy template rejected: {err}");
            }
        }
        catalog
    }

    pub fn insert(&mut self, template: EnemyTemplate) -> Result<()> {
        template.validate()?;
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Load templates from a JSON array, validating each.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let templates: Vec<EnemyTemplate> =
            serde_json::from_str(json).map_err(|e| CoreError::CatalogParse(e.to_string()))?;
        for template in templates {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Templates whose base level falls in the given range.
    pub fn in_level_range(&self, min: u32, max: u32) -> Vec<&EnemyTemplate> {
        let mut found: Vec<_> = self
            .templates
            .values()
            .filter(|t| (min..=max).contains(&t.level))
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }
}

impl EnemyCatalog for InMemoryEnemyCatalog {
    fn get(&self, id: &str) -> Result<&EnemyTemplate> {
        self.templates
            .get(id)
            .ok_or_else(|| CoreError::UnknownEnemyTemplate(id.to_string()))
    }

    fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

struct TemplateSpec {
    id: &'static str,
    name: &'static str,
    level: u32,
    behavior: Behavior,
    category: EnemyCategory,
    max_health: u32,
    attack: i32,
    defense: i32,
    magic_power: i32,
    speed: i32,
    critical_chance: i32,
    block_chance: i32,
    abilities: &'static [SpecialAbility],
    magic_resistance: i32,
    physical_resistance: i32,
    experience_reward: u64,
    gold_min: u64,
    gold_max: u64,
    loot: &'static [(&'static str, f64)],
}

impl TemplateSpec {
    fn build(&self) -> EnemyTemplate {
        EnemyTemplate {
            id: self.id.to_string(),
            name: self.name.to_string(),
            level: self.level,
            behavior: self.behavior,
            category: self.category,
            max_health: self.max_health,
            attack: self.attack,
            defense: self.defense,
            magic_power: self.magic_power,
            speed: self.speed,
            critical_chance: self.critical_chance,
            block_chance: self.block_chance,
            special_abilities: self.abilities.to_vec(),
            magic_resistance: self.magic_resistance,
            physical_resistance: self.physical_resistance,
            experience_reward: self.experience_reward,
            gold_min: self.gold_min,
            gold_max: self.gold_max,
            loot_table: self
                .loot
                .iter()
                .map(|(item_id, chance)| LootEntry {
                    item_id: (*item_id).to_string(),
                    chance: *chance,
                })
                .collect(),
        }
    }
}

fn default_templates() -> Vec<EnemyTemplate> {
    use Behavior::*;
    use EnemyCategory::*;
    use SpecialAbility::*;

    const SPECS: &[TemplateSpec] = &[
        // ====================================================================
        // FOREST
        // ====================================================================
        TemplateSpec {
            id: "forest_wolf",
            name: "Forest Wolf",
            level: 1,
            behavior: Aggressive,
            category: Normal,
            max_health: 50,
            attack: 12,
            defense: 3,
            magic_power: 0,
            speed: 15,
            critical_chance: 8,
            block_chance: 5,
            abilities: &[Howl],
            magic_resistance: 0,
            physical_resistance: 0,
            experience_reward: 25,
            gold_min: 8,
            gold_max: 15,
            loot: &[("wolf_pelt", 0.3), ("small_health_potion", 0.2)],
        },
        TemplateSpec {
            id: "giant_spider",
            name: "Giant Spider",
            level: 2,
            behavior: Defensive,
            category: Normal,
            max_health: 35,
            attack: 10,
            defense: 2,
            magic_power: 0,
            speed: 12,
            critical_chance: 5,
            block_chance: 15,
            abilities: &[PoisonBite, WebTrap],
            magic_resistance: 0,
            physical_resistance: 0,
            experience_reward: 30,
            gold_min: 12,
            gold_max: 20,
            loot: &[("spider_silk", 0.4), ("poison_gland", 0.2)],
        },
        TemplateSpec {
            id: "wild_boar",
            name: "Wild Boar",
            level: 2,
            behavior: Berserker,
            category: Normal,
            max_health: 60,
            attack: 18,
            defense: 8,
            magic_power: 0,
            speed: 8,
            critical_chance: 12,
            block_chance: 8,
            abilities: &[Charge],
            magic_resistance: 0,
            physical_resistance: 15,
            experience_reward: 35,
            gold_min: 15,
            gold_max: 25,
            loot: &[("boar_hide", 0.35)],
        },
        TemplateSpec {
            id: "forest_bandit",
            name: "Forest Bandit",
            level: 3,
            behavior: Balanced,
            category: Normal,
            max_health: 70,
            attack: 20,
            defense: 12,
            magic_power: 0,
            speed: 18,
            critical_chance: 15,
            block_chance: 12,
            abilities: &[SneakAttack],
            magic_resistance: 0,
            physical_resistance: 0,
            experience_reward: 45,
            gold_min: 20,
            gold_max: 35,
            loot: &[("bronze_dagger", 0.2), ("leather_armor", 0.15)],
        },
        TemplateSpec {
            id: "dire_wolf",
            name: "Dire Wolf",
            level: 5,
            behavior: Aggressive,
            category: Normal,
            max_health: 90,
            attack: 28,
            defense: 15,
            magic_power: 0,
            speed: 20,
            critical_chance: 18,
            block_chance: 10,
            abilities: &[Howl],
            magic_resistance: 0,
            physical_resistance: 0,
            experience_reward: 75,
            gold_min: 35,
            gold_max: 50,
            loot: &[("dire_wolf_fang", 0.3), ("health_potion", 0.25)],
        },
        TemplateSpec {
            id: "forest_troll",
            name: "Forest Troll",
            level: 6,
            behavior: Defensive,
            category: Normal,
            max_health: 120,
            attack: 35,
            defense: 25,
            magic_power: 0,
            speed: 8,
            critical_chance: 8,
            block_chance: 20,
            abilities: &[Regeneration],
            magic_resistance: 0,
            physical_resistance: 30,
            experience_reward: 100,
            gold_min: 45,
            gold_max: 70,
            loot: &[("troll_moss", 0.4)],
        },
        // ====================================================================
        // DUNGEON
        // ====================================================================
        TemplateSpec {
            id: "skeleton_warrior",
            name: "Skeleton Warrior",
            level: 2,
            behavior: Balanced,
            category: Normal,
            max_health: 40,
            attack: 15,
            defense: 8,
            magic_power: 0,
            speed: 12,
            critical_chance: 5,
            block_chance: 18,
            abilities: &[BoneThrow],
            magic_resistance: 0,
            physical_resistance: 20,
            experience_reward: 40,
            gold_min: 18,
            gold_max: 30,
            loot: &[("bone_fragment", 0.5)],
        },
        TemplateSpec {
            id: "zombie",
            name: "Rotting Zombie",
            level: 1,
            behavior: Aggressive,
            category: Normal,
            max_health: 60,
            attack: 12,
            defense: 4,
            magic_power: 0,
            speed: 6,
            critical_chance: 3,
            block_chance: 5,
            abilities: &[],
            magic_resistance: 0,
            physical_resistance: 25,
            experience_reward: 25,
            gold_min: 10,
            gold_max: 20,
            loot: &[("small_health_potion", 0.2)],
        },
        TemplateSpec {
            id: "ghost",
            name: "Spectral Ghost",
            level: 3,
            behavior: Coward,
            category: Normal,
            max_health: 30,
            attack: 8,
            defense: 2,
            magic_power: 25,
            speed: 25,
            critical_chance: 20,
            block_chance: 30,
            abilities: &[],
            magic_resistance: 50,
            physical_resistance: 0,
            experience_reward: 50,
            gold_min: 25,
            gold_max: 40,
            loot: &[("ectoplasm", 0.4), ("mana_potion", 0.2)],
        },
        TemplateSpec {
            id: "orc_warrior",
            name: "Orc Warrior",
            level: 4,
            behavior: Berserker,
            category: Normal,
            max_health: 80,
            attack: 30,
            defense: 15,
            magic_power: 0,
            speed: 10,
            critical_chance: 20,
            block_chance: 8,
            abilities: &[Charge],
            magic_resistance: 0,
            physical_resistance: 10,
            experience_reward: 70,
            gold_min: 30,
            gold_max: 50,
            loot: &[("orc_axe", 0.25), ("chainmail", 0.15)],
        },
        TemplateSpec {
            id: "death_knight",
            name: "Death Knight",
            level: 7,
            behavior: Defensive,
            category: Normal,
            max_health: 140,
            attack: 40,
            defense: 30,
            magic_power: 20,
            speed: 15,
            critical_chance: 25,
            block_chance: 25,
            abilities: &[ShieldBash],
            magic_resistance: 30,
            physical_resistance: 20,
            experience_reward: 120,
            gold_min: 60,
            gold_max: 90,
            loot: &[("cursed_blade", 0.2), ("death_essence", 0.3)],
        },
        TemplateSpec {
            id: "lich",
            name: "Lich",
            level: 8,
            behavior: Balanced,
            category: MiniBoss,
            max_health: 100,
            attack: 25,
            defense: 15,
            magic_power: 50,
            speed: 20,
            critical_chance: 30,
            block_chance: 15,
            abilities: &[LifeDrain, Fireball],
            magic_resistance: 40,
            physical_resistance: 10,
            experience_reward: 150,
            gold_min: 70,
            gold_max: 100,
            loot: &[("necromantic_tome", 0.15), ("arcane_staff", 0.1)],
        },
        // ====================================================================
        // ARENA
        // ====================================================================
        TemplateSpec {
            id: "arena_gladiator",
            name: "Arena Gladiator",
            level: 5,
            behavior: Balanced,
            category: Normal,
            max_health: 100,
            attack: 35,
            defense: 20,
            magic_power: 0,
            speed: 22,
            critical_chance: 20,
            block_chance: 15,
            abilities: &[],
            magic_resistance: 0,
            physical_resistance: 0,
            experience_reward: 90,
            gold_min: 50,
            gold_max: 80,
            loot: &[("gladiator_helmet", 0.2)],
        },
        TemplateSpec {
            id: "champion_knight",
            name: "Champion Knight",
            level: 8,
            behavior: Defensive,
            category: Normal,
            max_health: 160,
            attack: 45,
            defense: 35,
            magic_power: 0,
            speed: 18,
            critical_chance: 25,
            block_chance: 30,
            abilities: &[ShieldBash],
            magic_resistance: 0,
            physical_resistance: 25,
            experience_reward: 180,
            gold_min: 90,
            gold_max: 120,
            loot: &[("champion_sword", 0.15), ("plate_armor", 0.1)],
        },
        TemplateSpec {
            id: "arena_mage",
            name: "Arena Mage",
            level: 7,
            behavior: Aggressive,
            category: Normal,
            max_health: 80,
            attack: 20,
            defense: 10,
            magic_power: 60,
            speed: 25,
            critical_chance: 35,
            block_chance: 20,
            abilities: &[Fireball],
            magic_resistance: 20,
            physical_resistance: 0,
            experience_reward: 140,
            gold_min: 70,
            gold_max: 110,
            loot: &[("battle_staff", 0.2), ("mage_robes", 0.15)],
        },
        // ====================================================================
        // BOSSES
        // ====================================================================
        TemplateSpec {
            id: "forest_king",
            name: "King of the Forest",
            level: 10,
            behavior: Balanced,
            category: Boss,
            max_health: 300,
            attack: 60,
            defense: 40,
            magic_power: 30,
            speed: 25,
            critical_chance: 30,
            block_chance: 25,
            abilities: &[Regeneration],
            magic_resistance: 25,
            physical_resistance: 25,
            experience_reward: 400,
            gold_min: 150,
            gold_max: 250,
            loot: &[("crown_of_forest", 0.8), ("nature_essence", 1.0)],
        },
        TemplateSpec {
            id: "dungeon_overlord",
            name: "Dungeon Overlord",
            level: 12,
            behavior: Aggressive,
            category: Boss,
            max_health: 400,
            attack: 80,
            defense: 50,
            magic_power: 40,
            speed: 20,
            critical_chance: 35,
            block_chance: 20,
            abilities: &[Fireball],
            magic_resistance: 40,
            physical_resistance: 30,
            experience_reward: 600,
            gold_min: 200,
            gold_max: 350,
            loot: &[("overlord_crown", 0.9), ("shadow_blade", 0.5)],
        },
        TemplateSpec {
            id: "arena_champion",
            name: "Arena Champion",
            level: 15,
            behavior: Balanced,
            category: Boss,
            max_health: 500,
            attack: 100,
            defense: 60,
            magic_power: 20,
            speed: 30,
            critical_chance: 40,
            block_chance: 35,
            abilities: &[ShieldBash],
            magic_resistance: 20,
            physical_resistance: 40,
            experience_reward: 800,
            gold_min: 300,
            gold_max: 500,
            loot: &[("champion_belt", 1.0), ("legendary_weapon", 0.3)],
        },
    ];

    SPECS.iter().map(TemplateSpec::build).collect()
}
