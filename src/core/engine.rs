//! Turn-based encounter resolution.
//!
//! The engine owns a character and a scaled enemy for the duration of one
//! encounter. The caller submits one player action per exchange; the
//! engine ticks status effects, runs both turns in speed order, and
//! settles rewards when the fight reaches a terminal state.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::character::progression::{add_experience, ExperienceGain};
use crate::character::stats::{effective_stats, StatBundle};
use crate::character::types::Character;
use crate::core::balance::{CHARACTER_DEFEND_BONUS, ENEMY_DEFEND_BONUS, MAX_COMBAT_TURNS};
use crate::core::combat_math::{balanced_damage, flee_chance, resolve_attack, roll_percent};
use crate::enemies::types::{Enemy, SpecialAbility};
use crate::error::{CoreError, Result};
use crate::items::catalog::ItemCatalog;
use crate::items::types::{BuffStat, ConsumableEffect};
use crate::items::upgrade::{roll_material_drops, Material};

/// What the player can do on their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    MagicAttack,
    Defend,
    UseItem(String),
    Flee,
}

/// Action kind recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Attack,
    MagicAttack,
    Defend,
    UseItem,
    Flee,
    SpecialAbility,
    Effect,
}

/// One entry in the append-only combat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub actor: String,
    pub action: ActionKind,
    pub target: String,
    pub damage: u32,
    pub critical: bool,
    pub blocked: bool,
    /// Reserved for a dodge mechanic; dodge chance is carried as data but
    /// no current action sets this.
    pub missed: bool,
    pub message: String,
}

/// A timed in-combat effect on one combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEffect {
    DamageOverTime { per_turn: u32, turns: u32 },
    Regeneration { per_turn: u32, turns: u32 },
    StatModifier { stat: BuffStat, delta: i32, turns: u32 },
}

impl StatusEffect {
    fn turns_left(&self) -> u32 {
        match self {
            StatusEffect::DamageOverTime { turns, .. }
            | StatusEffect::Regeneration { turns, .. }
            | StatusEffect::StatModifier { turns, .. } => *turns,
        }
    }

    fn decrement(&mut self) {
        match self {
            StatusEffect::DamageOverTime { turns, .. }
            | StatusEffect::Regeneration { turns, .. }
            | StatusEffect::StatModifier { turns, .. } => *turns = turns.saturating_sub(1),
        }
    }
}

/// Why a defeat happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatReason {
    Slain,
    TurnLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    Ongoing,
    Victory,
    Defeat { reason: DefeatReason },
    Fled,
}

impl EncounterStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EncounterStatus::Ongoing)
    }
}

/// Everything granted by a victory, already applied to the character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryRewards {
    pub experience: ExperienceGain,
    pub gold: u64,
    pub loot: Vec<String>,
    pub materials: Vec<(Material, u32)>,
}

/// Live encounter state. Owns the character record until the fight ends.
#[derive(Debug)]
pub struct CombatState {
    pub character: Character,
    pub enemy: Enemy,
    /// Equipment-effective stats, fixed at engagement.
    pub stats: StatBundle,
    pub turn: u32,
    pub character_effects: Vec<StatusEffect>,
    pub enemy_effects: Vec<StatusEffect>,
    pub log: Vec<TurnRecord>,
    pub status: EncounterStatus,
    pub rewards: Option<VictoryRewards>,
    character_first: bool,
}

impl CombatState {
    /// Current value of a stat with active modifiers applied.
    fn character_stat(&self, stat: BuffStat) -> i32 {
        let base = match stat {
            BuffStat::Attack => self.stats.attack,
            BuffStat::Defense => self.stats.defense,
            BuffStat::Speed => self.stats.speed,
            BuffStat::MagicPower => self.stats.magic_power,
            BuffStat::CriticalChance => self.stats.critical_chance,
        };
        base + modifier_total(&self.character_effects, stat)
    }

    fn enemy_defense(&self) -> i32 {
        self.enemy.defense + modifier_total(&self.enemy_effects, BuffStat::Defense)
    }
}

fn modifier_total(effects: &[StatusEffect], which: BuffStat) -> i32 {
    effects
        .iter()
        .filter_map(|e| match e {
            StatusEffect::StatModifier { stat, delta, .. } if *stat == which => Some(*delta),
            _ => None,
        })
        .sum()
}

/// Non-cumulative effect insert: an identical modifier already in the
/// list is replaced, so re-defending refreshes instead of stacking.
fn add_modifier(effects: &mut Vec<StatusEffect>, stat: BuffStat, delta: i32, turns: u32) {
    effects.retain(
        |e| !matches!(e, StatusEffect::StatModifier { stat: s, delta: d, .. } if *s == stat && *d == delta),
    );
    effects.push(StatusEffect::StatModifier { stat, delta, turns });
}

/// Age stat modifiers once an opposing action has resolved against them.
/// Keying expiry to the opponent's action (not the start of the next
/// exchange) lets a one-exchange stance cover the next incoming action
/// in either turn order.
fn expire_modifiers(effects: &mut Vec<StatusEffect>) {
    for effect in effects.iter_mut() {
        if matches!(effect, StatusEffect::StatModifier { .. }) {
            effect.decrement();
        }
    }
    effects.retain(|e| e.turns_left() > 0);
}

pub struct CombatEngine<'c, C: ItemCatalog> {
    items: &'c C,
}

impl<'c, C: ItemCatalog> CombatEngine<'c, C> {
    pub fn new(items: &'c C) -> Self {
        Self { items }
    }

    /// Open an encounter. Turn order is decided once, by effective speed,
    /// with ties going to the character.
    pub fn engage(&self, character: Character, enemy: Enemy) -> Result<CombatState> {
        let stats = effective_stats(&character, self.items)?;
        let character_first = stats.speed >= enemy.speed;

        info!(
            character = %character.name,
            enemy = %enemy.name,
            enemy_level = enemy.level,
            character_first,
            "encounter started"
        );

        Ok(CombatState {
            character,
            enemy,
            stats,
            turn: 0,
            character_effects: Vec::new(),
            enemy_effects: Vec::new(),
            log: Vec::new(),
            status: EncounterStatus::Ongoing,
            rewards: None,
            character_first,
        })
    }

    /// Run one full exchange around the player's chosen action.
    ///
    /// Submitting after a terminal status is an error and leaves the
    /// state untouched.
    pub fn submit(
        &self,
        state: &mut CombatState,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<EncounterStatus> {
        if state.status.is_terminal() {
            return Err(CoreError::EncounterOver);
        }

        state.turn += 1;
        if state.turn > MAX_COMBAT_TURNS {
            warn!(turn = state.turn, "encounter hit the turn limit");
            state.log.push(TurnRecord {
                actor: String::new(),
                action: ActionKind::Effect,
                target: String::new(),
                damage: 0,
                critical: false,
                blocked: false,
                missed: false,
                message: "The fight drags on too long; exhaustion wins.".to_string(),
            });
            return Ok(self.finish(state, EncounterStatus::Defeat {
                reason: DefeatReason::TurnLimit,
            }, rng));
        }

        self.tick_effects(state);
        if let Some(status) = self.check_terminal(state, rng) {
            return Ok(status);
        }

        let mut fled = false;
        if state.character_first {
            self.player_turn(state, action, &mut fled, rng);
            expire_modifiers(&mut state.enemy_effects);
            if fled || state.status.is_terminal() {
                return Ok(state.status);
            }
            if let Some(status) = self.check_terminal(state, rng) {
                return Ok(status);
            }
            self.enemy_turn(state, rng);
            expire_modifiers(&mut state.character_effects);
        } else {
            self.enemy_turn(state, rng);
            expire_modifiers(&mut state.character_effects);
            if let Some(status) = self.check_terminal(state, rng) {
                return Ok(status);
            }
            self.player_turn(state, action, &mut fled, rng);
            expire_modifiers(&mut state.enemy_effects);
            if fled {
                return Ok(state.status);
            }
        }

        if let Some(status) = self.check_terminal(state, rng) {
            return Ok(status);
        }
        Ok(EncounterStatus::Ongoing)
    }

    fn check_terminal(
        &self,
        state: &mut CombatState,
        rng: &mut impl Rng,
    ) -> Option<EncounterStatus> {
        if !state.character.is_alive() {
            return Some(self.finish(state, EncounterStatus::Defeat {
                reason: DefeatReason::Slain,
            }, rng));
        }
        if !state.enemy.is_alive() {
            return Some(self.finish(state, EncounterStatus::Victory, rng));
        }
        None
    }

    /// Apply per-turn effects on both sides and expire finished ones.
    ///
    /// Stat modifiers are not aged here; they expire via
    /// [`expire_modifiers`] once the opposing action has resolved.
    fn tick_effects(&self, state: &mut CombatState) {
        let CombatState {
            character,
            enemy,
            stats,
            character_effects,
            enemy_effects,
            log,
            ..
        } = state;

        for effect in character_effects.iter_mut() {
            match *effect {
                StatusEffect::DamageOverTime { per_turn, .. } => {
                    character.take_damage(per_turn);
                    log.push(TurnRecord {
                        actor: character.name.clone(),
                        action: ActionKind::Effect,
                        target: character.name.clone(),
                        damage: per_turn,
                        critical: false,
                        blocked: false,
                        missed: false,
                        message: format!("{} suffers {} from a lingering wound", character.name, per_turn),
                    });
                    effect.decrement();
                }
                StatusEffect::Regeneration { per_turn, .. } => {
                    // Same ceiling as potions: the equipment-effective max
                    character.heal_to_cap(per_turn, stats.max_health);
                    effect.decrement();
                }
                StatusEffect::StatModifier { .. } => {}
            }
        }
        character_effects.retain(|e| e.turns_left() > 0);

        for effect in enemy_effects.iter_mut() {
            match *effect {
                StatusEffect::DamageOverTime { per_turn, .. } => {
                    enemy.take_damage(per_turn, false);
                    effect.decrement();
                }
                StatusEffect::Regeneration { per_turn, .. } => {
                    enemy.heal(per_turn);
                    effect.decrement();
                }
                StatusEffect::StatModifier { .. } => {}
            }
        }
        enemy_effects.retain(|e| e.turns_left() > 0);
    }

    fn player_turn(
        &self,
        state: &mut CombatState,
        action: PlayerAction,
        fled: &mut bool,
        rng: &mut impl Rng,
    ) {
        match action {
            PlayerAction::Attack => self.player_strike(state, false, rng),
            PlayerAction::MagicAttack => self.player_strike(state, true, rng),
            PlayerAction::Defend => {
                add_modifier(
                    &mut state.character_effects,
                    BuffStat::Defense,
                    CHARACTER_DEFEND_BONUS,
                    1,
                );
                state.log.push(TurnRecord {
                    actor: state.character.name.clone(),
                    action: ActionKind::Defend,
                    target: state.character.name.clone(),
                    damage: 0,
                    critical: false,
                    blocked: false,
                    missed: false,
                    message: format!(
                        "{} takes a defensive stance (+{} defense)",
                        state.character.name, CHARACTER_DEFEND_BONUS
                    ),
                });
            }
            PlayerAction::UseItem(item_id) => self.player_use_item(state, &item_id),
            PlayerAction::Flee => {
                let chance = flee_chance(state.character_stat(BuffStat::Speed), state.enemy.speed);
                let success = rng.gen::<f64>() < chance;
                state.log.push(TurnRecord {
                    actor: state.character.name.clone(),
                    action: ActionKind::Flee,
                    target: String::new(),
                    damage: 0,
                    critical: false,
                    blocked: false,
                    missed: false,
                    message: if success {
                        format!("{} escapes the fight", state.character.name)
                    } else {
                        format!("{} tries to flee but fails", state.character.name)
                    },
                });
                if success {
                    state.status = EncounterStatus::Fled;
                    info!(character = %state.character.name, "fled the encounter");
                    *fled = true;
                }
            }
        }
    }

    fn player_strike(&self, state: &mut CombatState, magic: bool, rng: &mut impl Rng) {
        // Magic with no magic power silently degrades to a physical swing
        let magic = magic && state.character_stat(BuffStat::MagicPower) > 0;
        let (attack_power, kind) = if magic {
            (state.character_stat(BuffStat::MagicPower), ActionKind::MagicAttack)
        } else {
            (state.character_stat(BuffStat::Attack), ActionKind::Attack)
        };

        if roll_percent(state.enemy.block_chance, rng) {
            state.log.push(TurnRecord {
                actor: state.character.name.clone(),
                action: kind,
                target: state.enemy.name.clone(),
                damage: 0,
                critical: false,
                blocked: true,
                missed: false,
                message: format!("{} blocks the attack", state.enemy.name),
            });
            return;
        }

        let strike = resolve_attack(
            attack_power,
            state.enemy_defense(),
            state.character_stat(BuffStat::CriticalChance),
            magic,
            rng,
        );
        let critical = strike.critical;
        let actual = state.enemy.take_damage(strike.damage, magic);

        state.log.push(TurnRecord {
            actor: state.character.name.clone(),
            action: kind,
            target: state.enemy.name.clone(),
            damage: actual,
            critical,
            blocked: false,
            missed: false,
            message: if critical {
                format!("Critical hit! {} deals {} damage", state.character.name, actual)
            } else {
                format!("{} deals {} damage", state.character.name, actual)
            },
        });
    }

    fn player_use_item(&self, state: &mut CombatState, item_id: &str) {
        let template = match self.items.consumable(item_id) {
            Ok(t) => t.clone(),
            Err(_) => {
                // Unknown item still consumes the turn
                state.log.push(TurnRecord {
                    actor: state.character.name.clone(),
                    action: ActionKind::UseItem,
                    target: state.character.name.clone(),
                    damage: 0,
                    critical: false,
                    blocked: false,
                    missed: false,
                    message: format!("{} fumbles for an item that is not there", state.character.name),
                });
                return;
            }
        };

        for effect in &template.effects {
            match *effect {
                ConsumableEffect::RestoreHealth(amount) => {
                    state.character.heal_to_cap(amount, state.stats.max_health);
                }
                ConsumableEffect::RestoreMana(amount) => {
                    state.character.restore_mana_to_cap(amount, state.stats.max_mana);
                }
                ConsumableEffect::RestoreAllMana => {
                    let cap = state.stats.max_mana;
                    state.character.restore_mana_to_cap(cap, cap);
                }
                ConsumableEffect::Buff { stat, delta, turns } => {
                    add_modifier(&mut state.character_effects, stat, delta, turns);
                }
                ConsumableEffect::Regeneration { per_turn, turns } => {
                    state
                        .character_effects
                        .push(StatusEffect::Regeneration { per_turn, turns });
                }
            }
        }

        state.log.push(TurnRecord {
            actor: state.character.name.clone(),
            action: ActionKind::UseItem,
            target: state.character.name.clone(),
            damage: 0,
            critical: false,
            blocked: false,
            missed: false,
            message: format!("{} uses {}", state.character.name, template.name),
        });
    }

    fn enemy_turn(&self, state: &mut CombatState, rng: &mut impl Rng) {
        if !state.enemy.special_abilities.is_empty()
            && roll_percent(state.enemy.ability_chance(), rng)
        {
            let idx = rng.gen_range(0..state.enemy.special_abilities.len());
            match state.enemy.special_abilities[idx] {
                SpecialAbility::PoisonBite => {
                    // Venom ignores armor
                    let damage = balanced_damage(state.enemy.attack + 5, 0, false, false, rng);
                    state.character.take_damage(damage);
                    state.character_effects.push(StatusEffect::DamageOverTime {
                        per_turn: 3,
                        turns: 3,
                    });
                    state.log.push(TurnRecord {
                        actor: state.enemy.name.clone(),
                        action: ActionKind::SpecialAbility,
                        target: state.character.name.clone(),
                        damage,
                        critical: false,
                        blocked: false,
                        missed: false,
                        message: format!(
                            "{} sinks venomous fangs in for {} damage",
                            state.enemy.name, damage
                        ),
                    });
                    return;
                }
                SpecialAbility::Regeneration => {
                    let amount = state.enemy.max_health / 10;
                    let healed = state.enemy.heal(amount);
                    state.log.push(TurnRecord {
                        actor: state.enemy.name.clone(),
                        action: ActionKind::SpecialAbility,
                        target: state.enemy.name.clone(),
                        damage: 0,
                        critical: false,
                        blocked: false,
                        missed: false,
                        message: format!("{} regenerates {} health", state.enemy.name, healed),
                    });
                    return;
                }
                // Flavor abilities resolve as a plain attack
                _ => {}
            }
        }

        if roll_percent(state.enemy.block_chance, rng) {
            add_modifier(&mut state.enemy_effects, BuffStat::Defense, ENEMY_DEFEND_BONUS, 1);
            state.log.push(TurnRecord {
                actor: state.enemy.name.clone(),
                action: ActionKind::Defend,
                target: state.enemy.name.clone(),
                damage: 0,
                critical: false,
                blocked: false,
                missed: false,
                message: format!("{} takes a defensive stance", state.enemy.name),
            });
            return;
        }

        self.enemy_strike(state, rng);
    }

    fn enemy_strike(&self, state: &mut CombatState, rng: &mut impl Rng) {
        if roll_percent(state.stats.block_chance, rng) {
            state.log.push(TurnRecord {
                actor: state.enemy.name.clone(),
                action: ActionKind::Attack,
                target: state.character.name.clone(),
                damage: 0,
                critical: false,
                blocked: true,
                missed: false,
                message: format!("{} blocks the attack", state.character.name),
            });
            return;
        }

        let defense = state.character_stat(BuffStat::Defense);
        let strike = resolve_attack(state.enemy.attack, defense, state.enemy.critical_chance, false, rng);
        let critical = strike.critical;
        state.character.take_damage(strike.damage);

        state.log.push(TurnRecord {
            actor: state.enemy.name.clone(),
            action: ActionKind::Attack,
            target: state.character.name.clone(),
            damage: strike.damage,
            critical,
            blocked: false,
            missed: false,
            message: if critical {
                format!("Critical hit! {} deals {} damage", state.enemy.name, strike.damage)
            } else {
                format!("{} deals {} damage", state.enemy.name, strike.damage)
            },
        });
    }

    /// Settle a terminal state. Victory applies gold, loot, materials, and
    /// experience (with any level-ups) to the character immediately.
    fn finish(
        &self,
        state: &mut CombatState,
        status: EncounterStatus,
        rng: &mut impl Rng,
    ) -> EncounterStatus {
        if status == EncounterStatus::Victory {
            let gold = rng.gen_range(state.enemy.gold_min..=state.enemy.gold_max);
            state.character.gold += gold;

            let mut loot = Vec::new();
            for entry in &state.enemy.loot_table {
                if rng.gen::<f64>() < entry.chance {
                    loot.push(entry.item_id.clone());
                }
            }

            let materials = roll_material_drops(state.enemy.category, state.enemy.level, rng);
            let experience = add_experience(&mut state.character, state.enemy.experience_reward);

            info!(
                character = %state.character.name,
                enemy = %state.enemy.name,
                gold,
                experience = experience.gained,
                levels_gained = experience.levels_gained,
                "victory"
            );

            state.rewards = Some(VictoryRewards {
                experience,
                gold,
                loot,
                materials,
            });
        } else {
            info!(
                character = %state.character.name,
                enemy = %state.enemy.name,
                ?status,
                turn = state.turn,
                "encounter over"
            );
        }

        state.status = status;
        status
    }
}
