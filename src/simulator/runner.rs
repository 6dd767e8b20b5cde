//! Bulk encounter runner.
//!
//! Every run goes through the real engine and scaler, so simulation
//! results match live combat exactly. Runs are seeded individually for
//! reproducibility.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::character::progression::add_experience;
use crate::character::stats::effective_stats;
use crate::character::types::Character;
use crate::core::balance::MAX_LEVEL;
use crate::core::engine::{CombatEngine, PlayerAction};
use crate::core::scaling::scale_enemy;
use crate::enemies::catalog::{EnemyCatalog, InMemoryEnemyCatalog};
use crate::error::Result;
use crate::items::catalog::InMemoryItemCatalog;
use crate::simulator::config::SimConfig;
use crate::simulator::report::{RunStats, SimReport};

/// Raise a fresh character to the requested level, capped at [`MAX_LEVEL`].
fn character_at_level(config: &SimConfig) -> Character {
    let target = config.character_level.min(MAX_LEVEL);
    let mut character = Character::new("Simulated Hero", config.class);
    while character.level < target {
        let needed = character.experience_needed - character.experience;
        add_experience(&mut character, needed);
    }
    character.weapon.tier = config.equipment_tier;
    character.armor.tier = config.equipment_tier;
    character
}

/// The auto-policy mirrors live auto-combat: lead with magic when it
/// out-damages the weapon arm, otherwise swing.
fn auto_action(magic_power: i32, attack: i32) -> PlayerAction {
    if magic_power > attack {
        PlayerAction::MagicAttack
    } else {
        PlayerAction::Attack
    }
}

/// Run the configured batch of encounters against stock catalogs.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    let items = InMemoryItemCatalog::with_defaults();
    let enemies = InMemoryEnemyCatalog::with_defaults();
    run_simulation_with(config, &items, &enemies)
}

/// Run against caller-supplied catalogs.
pub fn run_simulation_with(
    config: &SimConfig,
    items: &InMemoryItemCatalog,
    enemies: &impl EnemyCatalog,
) -> Result<SimReport> {
    let template = enemies.get(&config.enemy_id)?;
    let engine = CombatEngine::new(items);

    let mut runs = Vec::with_capacity(config.num_runs as usize);
    for i in 0..config.num_runs {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));

        let character = character_at_level(config);
        let stats = effective_stats(&character, items)?;
        let enemy = scale_enemy(template, &stats, character.level, config.context, &mut rng);

        let mut state = engine.engage(character, enemy)?;
        let action = auto_action(stats.magic_power, stats.attack);

        let status = loop {
            let status = engine.submit(&mut state, action.clone(), &mut rng)?;
            if status.is_terminal() {
                break status;
            }
        };

        let (experience_gained, gold_gained) = state
            .rewards
            .as_ref()
            .map(|r| (r.experience.gained, r.gold))
            .unwrap_or((0, 0));

        runs.push(RunStats {
            status,
            turns: state.turn,
            remaining_health_pct: if state.stats.max_health > 0 {
                state.character.health as f64 / state.stats.max_health as f64
            } else {
                0.0
            },
            experience_gained,
            gold_gained,
        });
    }

    let report = SimReport::from_runs(&runs);
    debug!(
        num_runs = report.num_runs,
        victories = report.victories,
        win_rate = report.win_rate,
        avg_turns = report.avg_turns,
        "simulation finished"
    );
    Ok(report)
}
