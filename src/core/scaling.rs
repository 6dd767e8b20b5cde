//! Power estimation and player-relative enemy scaling.
//!
//! Power is a heuristic: it calibrates enemies and feeds the pre-fight
//! hint, and never decides a combat outcome itself.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::character::stats::StatBundle;
use crate::core::balance::{
    level_reward_multiplier, ENEMY_MIN_ATTACK, ENEMY_MIN_DEFENSE, ENEMY_MIN_HEALTH,
    EXP_PER_ENEMY_LEVEL, GOLD_PER_ENEMY_LEVEL, GOLD_SPREAD, POWER_PER_ATTACK, POWER_PER_CRIT,
    POWER_PER_DEFENSE, POWER_PER_LEVEL, POWER_PER_MAX_HEALTH, POWER_PER_SPEED,
    POWER_SPLIT_ATTACK, POWER_SPLIT_DEFENSE, POWER_SPLIT_HEALTH, TARGET_POWER_RATIO,
};
use crate::enemies::types::{Behavior, Enemy, EnemyTemplate};

/// Where an encounter takes place. Each context carries a fixed
/// difficulty multiplier; the table is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterContext {
    ForestEasy,
    ForestNormal,
    DungeonFloor1,
    DungeonFloor2,
    DungeonFloor3,
    Arena,
    Boss,
}

impl EncounterContext {
    pub fn difficulty_multiplier(&self) -> f64 {
        match self {
            EncounterContext::ForestEasy => 0.8,
            EncounterContext::ForestNormal => 1.0,
            EncounterContext::DungeonFloor1 => 1.1,
            EncounterContext::DungeonFloor2 => 1.25,
            EncounterContext::DungeonFloor3 => 1.4,
            EncounterContext::Arena => 1.3,
            EncounterContext::Boss => 1.8,
        }
    }
}

/// Weighted linear combat power for a character.
pub fn combat_power(stats: &StatBundle, level: u32) -> i64 {
    let power = level as f64 * POWER_PER_LEVEL
        + stats.attack as f64 * POWER_PER_ATTACK
        + stats.defense as f64 * POWER_PER_DEFENSE
        + stats.max_health as f64 * POWER_PER_MAX_HEALTH
        + stats.speed as f64 * POWER_PER_SPEED
        + stats.critical_chance as f64 * POWER_PER_CRIT;
    power as i64
}

/// Same weighting applied to a scaled enemy, for the pre-fight hint.
pub fn enemy_power(enemy: &Enemy) -> i64 {
    let power = enemy.level as f64 * POWER_PER_LEVEL
        + enemy.attack as f64 * POWER_PER_ATTACK
        + enemy.defense as f64 * POWER_PER_DEFENSE
        + enemy.max_health as f64 * POWER_PER_MAX_HEALTH
        + enemy.speed as f64 * POWER_PER_SPEED
        + enemy.critical_chance as f64 * POWER_PER_CRIT;
    power as i64
}

/// Player-facing fight difficulty hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Overwhelming,
    Favorable,
    Even,
    Risky,
    Dangerous,
}

pub fn recommendation(player_power: i64, enemy_power: i64) -> Recommendation {
    let ratio = player_power as f64 / enemy_power.max(1) as f64;
    if ratio >= 1.5 {
        Recommendation::Overwhelming
    } else if ratio >= 1.2 {
        Recommendation::Favorable
    } else if ratio >= 0.8 {
        Recommendation::Even
    } else if ratio >= 0.6 {
        Recommendation::Risky
    } else {
        Recommendation::Dangerous
    }
}

/// Build a live enemy from a template, calibrated against the player.
///
/// Target power is 85% of the player's, pushed up or down by the context
/// multiplier, then split across health/attack/defense. Attack and defense
/// budgets convert back to stat points through the estimator weights, so
/// the enemy's own estimated power lands near the target instead of
/// blowing past it. Behavior tags shape the result and hard floors keep
/// it viable.
pub fn scale_enemy(
    template: &EnemyTemplate,
    player_stats: &StatBundle,
    player_level: u32,
    context: EncounterContext,
    rng: &mut impl Rng,
) -> Enemy {
    let player_power = combat_power(player_stats, player_level) as f64;
    let multiplier = context.difficulty_multiplier();
    let target_power = player_power * TARGET_POWER_RATIO * multiplier;

    let enemy_level = (player_level as i64 + rng.gen_range(-1..=1)).max(1) as u32;

    let mut max_health = (target_power * POWER_SPLIT_HEALTH) as i64;
    let mut attack = (target_power * POWER_SPLIT_ATTACK / POWER_PER_ATTACK) as i64;
    let mut defense = (target_power * POWER_SPLIT_DEFENSE / POWER_PER_DEFENSE) as i64;

    match template.behavior {
        Behavior::Aggressive => {
            attack = (attack as f64 * 1.2) as i64;
            defense = (defense as f64 * 0.85) as i64;
            max_health = (max_health as f64 * 0.85) as i64;
        }
        Behavior::Defensive => {
            defense = (defense as f64 * 1.2) as i64;
            max_health = (max_health as f64 * 1.2) as i64;
            attack = (attack as f64 * 0.85) as i64;
        }
        Behavior::Berserker => {
            attack = (attack as f64 * 1.3) as i64;
            defense = (defense as f64 * 0.8) as i64;
        }
        Behavior::Balanced | Behavior::Coward => {}
    }

    let max_health = (max_health.max(0) as u32).max(ENEMY_MIN_HEALTH);
    let attack = (attack as i32).max(ENEMY_MIN_ATTACK);
    let defense = (defense as i32).max(ENEMY_MIN_DEFENSE);

    let gold_base = enemy_level as f64 * GOLD_PER_ENEMY_LEVEL as f64 * multiplier;
    let experience = (enemy_level as f64
        * EXP_PER_ENEMY_LEVEL as f64
        * level_reward_multiplier(enemy_level, player_level)
        * multiplier) as u64;

    let enemy = Enemy {
        name: template.name.clone(),
        level: enemy_level,
        behavior: template.behavior,
        category: template.category,
        max_health,
        health: max_health,
        attack,
        defense,
        magic_power: template.magic_power,
        speed: template.speed + enemy_level as i32,
        critical_chance: template.critical_chance,
        block_chance: template.block_chance,
        special_abilities: template.special_abilities.clone(),
        magic_resistance: template.magic_resistance,
        physical_resistance: template.physical_resistance,
        experience_reward: experience,
        gold_min: (gold_base * (1.0 - GOLD_SPREAD)) as u64,
        gold_max: (gold_base * (1.0 + GOLD_SPREAD)) as u64,
        loot_table: template.loot_table.clone(),
    };

    debug!(
        name = %enemy.name,
        player_level,
        enemy_level,
        max_health,
        attack,
        defense,
        "scaled enemy"
    );

    enemy
}
