//! Simulation report aggregation.

use crate::core::engine::{DefeatReason, EncounterStatus};

/// Outcome of a single simulated encounter.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    pub status: EncounterStatus,
    pub turns: u32,
    pub remaining_health_pct: f64,
    pub experience_gained: u64,
    pub gold_gained: u64,
}

/// Aggregated results from a batch of encounters.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub turn_limit_defeats: u32,
    pub win_rate: f64,
    pub avg_turns: f64,
    /// Average fraction of max health left after a victory.
    pub avg_victory_health_pct: f64,
    pub total_experience: u64,
    pub total_gold: u64,
}

impl SimReport {
    pub fn from_runs(runs: &[RunStats]) -> Self {
        let num_runs = runs.len() as u32;
        let victories = runs
            .iter()
            .filter(|r| r.status == EncounterStatus::Victory)
            .count() as u32;
        let defeats = runs
            .iter()
            .filter(|r| matches!(r.status, EncounterStatus::Defeat { .. }))
            .count() as u32;
        let turn_limit_defeats = runs
            .iter()
            .filter(|r| {
                r.status
                    == EncounterStatus::Defeat {
                        reason: DefeatReason::TurnLimit,
                    }
            })
            .count() as u32;

        let avg_turns = if num_runs > 0 {
            runs.iter().map(|r| r.turns as f64).sum::<f64>() / num_runs as f64
        } else {
            0.0
        };
        let avg_victory_health_pct = if victories > 0 {
            runs.iter()
                .filter(|r| r.status == EncounterStatus::Victory)
                .map(|r| r.remaining_health_pct)
                .sum::<f64>()
                / victories as f64
        } else {
            0.0
        };

        Self {
            num_runs,
            victories,
            defeats,
            turn_limit_defeats,
            win_rate: if num_runs > 0 {
                victories as f64 / num_runs as f64
            } else {
                0.0
            },
            avg_turns,
            avg_victory_health_pct,
            total_experience: runs.iter().map(|r| r.experience_gained).sum(),
            total_gold: runs.iter().map(|r| r.gold_gained).sum(),
        }
    }
}
