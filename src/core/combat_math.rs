//! Shared combat math for the engine and simulator.
//!
//! Pure functions with injected randomness. Both the encounter engine and
//! the bulk simulator resolve hits through these so the numbers never drift.

use rand::Rng;

use crate::core::balance::{
    CRITICAL_MULTIPLIER, DAMAGE_BASE_MULTIPLIER, DAMAGE_VARIANCE, DEFENSE_EFFICIENCY,
    FLEE_BASE_CHANCE, FLEE_MAX_CHANCE, FLEE_MIN_CHANCE, FLEE_SPEED_FACTOR,
    MAGIC_DEFENSE_PENETRATION, MINIMUM_DAMAGE_RATIO,
};

/// A single resolved strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: u32,
    pub critical: bool,
}

/// Core damage formula.
///
/// Defense soaks at 60% efficiency, magic sees only half the defense, and
/// a hit always lands for at least 20% of the raw attack power. Variance
/// and the crit multiplier apply after the floor. Never returns 0.
pub fn balanced_damage(
    attack_power: i32,
    defender_defense: i32,
    critical: bool,
    magic: bool,
    rng: &mut impl Rng,
) -> u32 {
    let attack = attack_power.max(0) as f64;
    let mut defense = defender_defense.max(0) as f64;
    if magic {
        defense *= MAGIC_DEFENSE_PENETRATION;
    }

    let base = attack * DAMAGE_BASE_MULTIPLIER - defense * DEFENSE_EFFICIENCY;
    let floor = attack * MINIMUM_DAMAGE_RATIO;
    let mut damage = base.max(floor);

    damage *= rng.gen_range(1.0 - DAMAGE_VARIANCE..=1.0 + DAMAGE_VARIANCE);
    if critical {
        damage *= CRITICAL_MULTIPLIER;
    }

    (damage as i64).max(1) as u32
}

/// Roll a whole-percent chance (crit, block, ability use).
pub fn roll_percent(chance_percent: i32, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=100) <= chance_percent
}

/// Resolve an attack: crit roll then damage.
pub fn resolve_attack(
    attack_power: i32,
    defender_defense: i32,
    critical_chance: i32,
    magic: bool,
    rng: &mut impl Rng,
) -> Strike {
    let critical = roll_percent(critical_chance, rng);
    let damage = balanced_damage(attack_power, defender_defense, critical, magic, rng);
    Strike { damage, critical }
}

/// Probability of escaping, from the speed differential.
pub fn flee_chance(character_speed: i32, enemy_speed: i32) -> f64 {
    let chance = FLEE_BASE_CHANCE + (character_speed - enemy_speed) as f64 * FLEE_SPEED_FACTOR;
    chance.clamp(FLEE_MIN_CHANCE, FLEE_MAX_CHANCE)
}

/// Reduce incoming damage by a percent resistance. A resisted hit still
/// deals at least 1.
pub fn apply_resistance(damage: u32, resistance_percent: i32) -> u32 {
    if resistance_percent <= 0 {
        return damage;
    }
    let reduced = damage as i64 - damage as i64 * resistance_percent as i64 / 100;
    reduced.max(1) as u32
}
