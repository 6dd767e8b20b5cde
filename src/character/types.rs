//! Character combat view: the slice of a persisted character record that
//! the combat core reads and mutates. Persistence itself is the caller's
//! concern.

use serde::{Deserialize, Serialize};

use crate::character::class::{self, CharacterClass};
use crate::core::balance::{BASE_EXP_REQUIRED, STARTING_GOLD};
use crate::items::types::EquippedItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u64,
    pub experience_needed: u64,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub attack: i32,
    pub defense: i32,
    pub magic_power: i32,
    pub speed: i32,
    pub critical_chance: i32,
    pub block_chance: i32,
    pub gold: u64,
    pub weapon: EquippedItem,
    pub armor: EquippedItem,
}

impl Character {
    /// Create a fresh level-1 character with class base stats and the
    /// class's starting equipment at tier 0.
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        let stats = class::base_stats(class);
        let (weapon, armor) = class::starting_equipment(class);
        Self {
            name: name.into(),
            class,
            level: 1,
            experience: 0,
            experience_needed: BASE_EXP_REQUIRED,
            health: stats.max_health,
            max_health: stats.max_health,
            mana: stats.max_mana,
            max_mana: stats.max_mana,
            attack: stats.attack,
            defense: stats.defense,
            magic_power: stats.magic_power,
            speed: stats.speed,
            critical_chance: stats.critical_chance,
            block_chance: stats.block_chance,
            gold: STARTING_GOLD,
            weapon: EquippedItem::new(weapon),
            armor: EquippedItem::new(armor),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, clamped at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Heal toward the base maximum. Returns the amount actually restored.
    ///
    /// Callers holding effective stats (equipment max-health bonuses) should
    /// pass the effective ceiling via [`Character::heal_to_cap`] instead.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.heal_to_cap(amount, self.max_health)
    }

    /// Heal toward an explicit ceiling (the effective max health).
    pub fn heal_to_cap(&mut self, amount: u32, cap: u32) -> u32 {
        let old = self.health;
        self.health = (self.health + amount).min(cap.max(old));
        self.health - old
    }

    /// Restore mana toward an explicit ceiling. Returns the amount restored.
    pub fn restore_mana_to_cap(&mut self, amount: u32, cap: u32) -> u32 {
        let old = self.mana;
        self.mana = (self.mana + amount).min(cap.max(old));
        self.mana - old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_warrior() {
        let c = Character::new("Ragnar", CharacterClass::Warrior);
        assert_eq!(c.level, 1);
        assert_eq!(c.health, 100);
        assert_eq!(c.max_health, 100);
        assert_eq!(c.experience_needed, 100);
        assert_eq!(c.gold, 50);
        assert_eq!(c.weapon.tier, 0);
        assert!(c.is_alive());
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut c = Character::new("Ragnar", CharacterClass::Warrior);
        c.take_damage(250);
        assert_eq!(c.health, 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_heal_never_exceeds_max() {
        let mut c = Character::new("Ragnar", CharacterClass::Warrior);
        c.health = 10;
        let healed = c.heal(50);
        assert_eq!(healed, 50);
        assert_eq!(c.health, 60);
        let healed = c.heal(500);
        assert_eq!(healed, 40);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_heal_to_cap_respects_equipment_ceiling() {
        let mut c = Character::new("Ragnar", CharacterClass::Warrior);
        c.health = 95;
        // Equipment grants +20 max health: the effective ceiling is 120.
        let healed = c.heal_to_cap(50, 120);
        assert_eq!(healed, 25);
        assert_eq!(c.health, 120);
    }

    #[test]
    fn test_heal_does_not_reduce_overfull_pool() {
        // If the maximum dropped (equipment change), the current pool is
        // never automatically reduced.
        let mut c = Character::new("Ragnar", CharacterClass::Warrior);
        c.health = 130;
        let healed = c.heal_to_cap(10, 120);
        assert_eq!(healed, 0);
        assert_eq!(c.health, 130);
    }
}
