//! Simulation runner. Each encounter is a real [`BattleRoom::resolve`] with
//! pacing disabled and a fresh party.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::character::Party;
use crate::combat::{BattleConfig, NoProgress, TriggerRegistry};
use crate::error::Result;
use crate::plugins::damage_types::DamageTypeRegistry;
use crate::plugins::players::player_stats;
use crate::rooms::{BattleContext, BattleRoom};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Run the full simulation and return a report.
pub async fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    config.validate()?;
    let room = config.room()?;
    let battle_config = BattleConfig::instant();
    let damage_types = DamageTypeRegistry::with_builtins();

    let mut runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };
        let stats = simulate_single_run(config, &room, &battle_config, &damage_types, &mut rng)
            .await?;

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {}, {} turns, {} exp, {} gold",
                run_idx + 1,
                config.num_runs,
                if stats.victory { "won" } else { "lost" },
                stats.turns,
                stats.exp_reward,
                stats.gold
            );
        }
        runs.push(stats);
    }

    let report = SimReport::from_runs(config.node, runs);
    info!(
        runs = report.num_runs,
        win_rate = report.win_rate,
        "simulation complete"
    );
    Ok(report)
}

async fn simulate_single_run(
    config: &SimConfig,
    room: &BattleRoom,
    battle_config: &BattleConfig,
    damage_types: &DamageTypeRegistry,
    rng: &mut ChaCha8Rng,
) -> Result<RunStats> {
    let members = config
        .party
        .iter()
        .map(|id| player_stats(id))
        .collect::<Result<Vec<_>>>()?;
    let mut party = Party::new(members);
    // Subscriptions are scoped to one encounter
    let mut triggers = TriggerRegistry::new();
    let mut progress = NoProgress;

    let result = room
        .resolve(
            &mut party,
            None,
            BattleContext {
                config: battle_config,
                damage_types,
                triggers: &mut triggers,
                progress: &mut progress,
            },
            rng,
        )
        .await;
    Ok(RunStats::from(&result))
}
