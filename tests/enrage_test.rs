//! Integration test: Stalled Encounter -> Enrage
//!
//! A foe that cannot be killed in time must eventually enrage, grow its
//! attack, and end the battle through attack growth or bleed waves.

use autofighter::character::Stats;
use autofighter::combat::{
    BattleConfig, BattleSnapshot, Combat, CombatReport, Fighter, TriggerRegistry,
};
use autofighter::core::constants::ENRAGED_PASSIVE;
use autofighter::plugins::damage_types::DamageTypeRegistry;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn tank(atk: u32) -> Fighter {
    Fighter::new(Stats {
        atk,
        crit_rate: 0.0,
        regain: 0.0,
        effect_resistance: 1.0,
        ..Stats::new("tank", "Tank")
    })
}

fn wall(atk: u32, regain: f64) -> Fighter {
    Fighter::new(Stats {
        hp: u32::MAX,
        max_hp: u32::MAX,
        atk,
        defense: 1_000,
        crit_rate: 0.0,
        regain,
        effect_resistance: 1.0,
        ..Stats::new("wall", "Wall")
    })
}

async fn fight(
    config: &BattleConfig,
    member: Fighter,
    foe: Fighter,
    snapshots: &mut Vec<BattleSnapshot>,
) -> CombatReport {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let registry = DamageTypeRegistry::with_builtins();
    let mut triggers = TriggerRegistry::new();
    Combat::new(
        vec![member],
        foe,
        false,
        1,
        1.0,
        config,
        &registry,
        &mut triggers,
        snapshots,
    )
    .run(&mut rng)
    .await
}

#[tokio::test]
async fn test_enrage_attack_growth_ends_stalled_battle() {
    let config = BattleConfig {
        enrage_turns_normal: 10,
        bleed_interval: 10_000,
        ..BattleConfig::instant()
    };
    let mut snapshots = Vec::new();
    let report = fight(&config, tank(1), wall(10, 0.0), &mut snapshots).await;

    assert!(!report.victory);
    assert!(report.enrage.active);
    assert!(report.enrage.stacks > 0);
    assert!(report.foe.stats.atk > 10);
    assert_eq!(
        report
            .foe
            .stats
            .passives
            .iter()
            .filter(|p| p.as_str() == ENRAGED_PASSIVE)
            .count(),
        1
    );
    assert!(report.turns > config.enrage_turns_normal);
}

#[tokio::test]
async fn test_enrage_telemetry_in_snapshots_is_monotonic() {
    let config = BattleConfig {
        enrage_turns_normal: 10,
        bleed_interval: 10_000,
        ..BattleConfig::instant()
    };
    let mut snapshots = Vec::new();
    fight(&config, tank(1), wall(10, 0.0), &mut snapshots).await;

    let mut last_stacks = 0;
    for snapshot in &snapshots {
        assert_eq!(snapshot.enrage.active, snapshot.turn > 10);
        assert!(snapshot.enrage.stacks >= last_stacks);
        last_stacks = snapshot.enrage.stacks;
    }
    assert!(last_stacks > 0);
}

#[tokio::test]
async fn test_bleed_waves_end_a_harmless_battle() {
    let config = BattleConfig {
        enrage_turns_normal: 5,
        bleed_interval: 2,
        ..BattleConfig::instant()
    };
    let mut snapshots = Vec::new();
    // Neither side can hurt the other; the wall fully heals every other turn
    let report = fight(&config, tank(0), wall(0, 1.0), &mut snapshots).await;

    assert!(!report.victory);
    assert!(report.enrage.active);
    assert_eq!(report.party[0].stats.hp, 0);
    assert!(report.party[0].stats.damage_taken >= 1_000);
    assert_eq!(report.foe.stats.atk, 0);
}
