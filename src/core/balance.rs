//! Shared balance constants for the combat core.
//!
//! All core balance numbers live here. Change once, test everywhere.

// =============================================================================
// LEVELING & PROGRESSION
// =============================================================================

/// Level cap.
pub const MAX_LEVEL: u32 = 50;

/// Experience required to reach level 2.
pub const BASE_EXP_REQUIRED: u64 = 100;

/// Experience threshold growth per level-up.
pub const EXP_MULTIPLIER: f64 = 1.5;

/// Gold granted at character creation.
pub const STARTING_GOLD: u64 = 50;

// =============================================================================
// DAMAGE FORMULA
// =============================================================================

/// Fraction of raw attack power that enters the damage formula.
pub const DAMAGE_BASE_MULTIPLIER: f64 = 0.85;

/// How much of the defender's defense is subtracted.
pub const DEFENSE_EFFICIENCY: f64 = 0.6;

/// A hit always lands for at least this fraction of raw attack power.
pub const MINIMUM_DAMAGE_RATIO: f64 = 0.2;

/// Uniform damage variance: final damage is scaled by [1-v, 1+v].
pub const DAMAGE_VARIANCE: f64 = 0.15;

/// Critical hit damage multiplier.
pub const CRITICAL_MULTIPLIER: f64 = 1.75;

/// Magic attacks only see this fraction of the defender's defense.
pub const MAGIC_DEFENSE_PENETRATION: f64 = 0.5;

// =============================================================================
// COMBAT ENGINE
// =============================================================================

/// Hard cap on encounter length; reaching it forces a defeat.
pub const MAX_COMBAT_TURNS: u32 = 50;

/// Flat one-exchange defense bonus from the character's Defend action.
pub const CHARACTER_DEFEND_BONUS: i32 = 10;

/// Flat one-exchange defense bonus from the enemy's block stance.
pub const ENEMY_DEFEND_BONUS: i32 = 8;

/// Base flee probability before the speed differential.
pub const FLEE_BASE_CHANCE: f64 = 0.5;

/// Flee probability gained per point of speed advantage.
pub const FLEE_SPEED_FACTOR: f64 = 0.02;

pub const FLEE_MIN_CHANCE: f64 = 0.1;
pub const FLEE_MAX_CHANCE: f64 = 0.9;

// =============================================================================
// ENEMY AI
// =============================================================================

/// Base chance per enemy turn to use a special ability.
pub const ABILITY_BASE_CHANCE: i32 = 15;

/// Ability chance below half health.
pub const ABILITY_CHANCE_WOUNDED: i32 = 25;

/// Ability chance below 30% health. Low-health enemies deliberately lean
/// on their high-value abilities.
pub const ABILITY_CHANCE_CRITICAL: i32 = 40;

// =============================================================================
// POWER ESTIMATION (heuristic only; never decides a combat outcome)
// =============================================================================

pub const POWER_PER_LEVEL: f64 = 20.0;
pub const POWER_PER_ATTACK: f64 = 8.0;
pub const POWER_PER_DEFENSE: f64 = 6.0;
pub const POWER_PER_MAX_HEALTH: f64 = 0.4;
pub const POWER_PER_SPEED: f64 = 2.0;
pub const POWER_PER_CRIT: f64 = 3.0;

// =============================================================================
// ENEMY SCALING
// =============================================================================

/// Scaled enemies target this fraction of the player's power before the
/// location multiplier. Fights are calibrated slightly in the player's
/// favor by default.
pub const TARGET_POWER_RATIO: f64 = 0.85;

/// How target power is budgeted across stats. Attack and defense budgets
/// are converted to stat points via the matching POWER_PER_* weight.
pub const POWER_SPLIT_HEALTH: f64 = 0.35;
pub const POWER_SPLIT_ATTACK: f64 = 0.40;
pub const POWER_SPLIT_DEFENSE: f64 = 0.25;

/// Hard floors so trivially weak characters never face a zero-stat enemy.
pub const ENEMY_MIN_HEALTH: u32 = 20;
pub const ENEMY_MIN_ATTACK: i32 = 5;
pub const ENEMY_MIN_DEFENSE: i32 = 1;

// =============================================================================
// REWARDS
// =============================================================================

/// Base experience per enemy level before band/location multipliers.
pub const EXP_PER_ENEMY_LEVEL: u64 = 25;

/// Base gold per enemy level before the location multiplier.
pub const GOLD_PER_ENEMY_LEVEL: u64 = 12;

/// Gold range spread: [1-s, 1+s] around the base.
pub const GOLD_SPREAD: f64 = 0.2;

// =============================================================================
// Helpers
// =============================================================================

/// Next experience threshold after a level-up.
pub fn next_experience_threshold(current: u64) -> u64 {
    (current as f64 * EXP_MULTIPLIER) as u64
}

/// Experience multiplier for the level difference between enemy and
/// player. Lower-level enemies grant reduced experience, higher-level
/// ones a bonus.
pub fn level_reward_multiplier(enemy_level: u32, player_level: u32) -> f64 {
    let diff = enemy_level as i64 - player_level as i64;
    if diff <= -2 {
        0.5
    } else if diff <= 0 {
        0.8
    } else if diff <= 2 {
        1.0
    } else {
        1.2
    }
}

/// Ability-use chance (percent) for an enemy at the given health fraction.
pub fn ability_chance_for_health(health: u32, max_health: u32) -> i32 {
    if max_health == 0 {
        return ABILITY_BASE_CHANCE;
    }
    let pct = health as f64 / max_health as f64 * 100.0;
    if pct < 30.0 {
        ABILITY_CHANCE_CRITICAL
    } else if pct < 50.0 {
        ABILITY_CHANCE_WOUNDED
    } else {
        ABILITY_BASE_CHANCE
    }
}
