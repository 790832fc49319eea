//! Enrage: the failsafe against stalled encounters.
//!
//! Once the turn counter passes the room's threshold the foe gains attack
//! every turn, and every `bleed_interval` stacks a wave of enrage bleed hits
//! both sides, each wave heavier than the last.

use super::config::BattleConfig;
use super::effects::DamageOverTime;
use super::fighter::Fighter;
use crate::character::Stats;
use crate::core::combat_math::enrage_bleed_damage;
use crate::core::constants::{ENRAGED_PASSIVE, ENRAGE_BLEED_ID};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Enrage telemetry reported in snapshots and results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrageState {
    pub active: bool,
    pub stacks: u32,
}

#[derive(Debug, Clone)]
pub struct Enrage {
    threshold: u32,
    base_atk: u32,
    atk_per_stack: f64,
    bleed_interval: u32,
    bleed_fraction: f64,
    bleed_turns: u32,
    active: bool,
    stacks: u32,
    waves: u32,
}

impl Enrage {
    pub fn new(config: &BattleConfig, boss: bool, base_atk: u32) -> Self {
        Self {
            threshold: config.enrage_threshold(boss),
            base_atk,
            atk_per_stack: config.enrage_atk_per_stack,
            bleed_interval: config.bleed_interval.max(1),
            bleed_fraction: config.bleed_fraction,
            bleed_turns: config.bleed_turns,
            active: false,
            stacks: 0,
            waves: 0,
        }
    }

    pub fn state(&self) -> EnrageState {
        EnrageState {
            active: self.active,
            stacks: self.stacks,
        }
    }

    pub fn waves(&self) -> u32 {
        self.waves
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Updates enrage for the current global `turn` and rescales foe attack.
    pub fn advance(&mut self, turn: u32, foe: &mut Stats) {
        if turn <= self.threshold {
            return;
        }
        if !self.active {
            self.active = true;
            if !foe.passives.iter().any(|p| p == ENRAGED_PASSIVE) {
                foe.passives.push(ENRAGED_PASSIVE.to_string());
            }
            info!(foe = foe.label(), turn, "enrage activated");
        }
        self.stacks = turn - self.threshold;
        let scaled = self.base_atk as f64 * (1.0 + self.atk_per_stack * self.stacks as f64);
        foe.atk = (scaled as u32).max(self.base_atk);
    }

    /// Stacks the next bleed wave would add, if one is due.
    pub fn pending_wave(&self) -> Option<u32> {
        let due = self.active && self.stacks >= self.bleed_interval * (self.waves + 1);
        due.then_some(1 + self.waves)
    }

    /// Fires at most one bleed wave. Every living party member and the foe
    /// receive `1 + waves` fresh bleed stacks. Returns the stacks added.
    pub fn apply_bleed_wave(&mut self, party: &mut [Fighter], foe: &mut Fighter) -> Option<u32> {
        let stacks = self.pending_wave()?;
        for fighter in party.iter_mut().filter(|f| f.is_alive()) {
            self.add_bleed(fighter, stacks);
        }
        if foe.is_alive() {
            self.add_bleed(foe, stacks);
        }
        self.waves += 1;
        info!(wave = self.waves, stacks, "enrage bleed wave");
        Some(stacks)
    }

    fn add_bleed(&self, fighter: &mut Fighter, stacks: u32) {
        let damage = enrage_bleed_damage(fighter.stats.max_hp, self.bleed_fraction);
        for _ in 0..stacks {
            fighter.effects.add_dot(DamageOverTime::new(
                "Enrage Bleed",
                damage,
                self.bleed_turns,
                ENRAGE_BLEED_ID,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foe() -> Stats {
        Stats {
            atk: 100,
            ..Stats::new("foe", "Foe")
        }
    }

    #[test]
    fn test_inactive_until_threshold_passed() {
        let config = BattleConfig::instant();
        let mut foe = foe();
        let mut enrage = Enrage::new(&config, false, foe.atk);
        enrage.advance(100, &mut foe);
        assert_eq!(enrage.state(), EnrageState::default());
        assert_eq!(foe.atk, 100);
        assert!(foe.passives.is_empty());
    }

    #[test]
    fn test_stacks_and_attack_scale() {
        let config = BattleConfig::instant();
        let mut foe = foe();
        let mut enrage = Enrage::new(&config, false, foe.atk);
        enrage.advance(101, &mut foe);
        assert_eq!(enrage.state(), EnrageState { active: true, stacks: 1 });
        assert_eq!(foe.atk, 140);

        enrage.advance(105, &mut foe);
        assert_eq!(enrage.state().stacks, 5);
        assert_eq!(foe.atk, 300);
        // Marker is appended only once
        assert_eq!(foe.passives, vec![ENRAGED_PASSIVE.to_string()]);
    }

    #[test]
    fn test_boss_threshold() {
        let config = BattleConfig::instant();
        let mut foe = foe();
        let mut enrage = Enrage::new(&config, true, foe.atk);
        enrage.advance(500, &mut foe);
        assert!(!enrage.state().active);
        enrage.advance(501, &mut foe);
        assert!(enrage.state().active);
    }

    #[test]
    fn test_bleed_waves_escalate_one_at_a_time() {
        let config = BattleConfig::instant();
        let mut foe_fighter = Fighter::new(foe());
        let mut party = vec![
            Fighter::new(Stats::new("a", "A")),
            Fighter::new(Stats::new("b", "B")),
        ];
        party[1].stats.hp = 0;
        let mut enrage = Enrage::new(&config, false, 100);

        enrage.advance(109, &mut foe_fighter.stats);
        assert_eq!(enrage.apply_bleed_wave(&mut party, &mut foe_fighter), None);

        // Far past several thresholds: still only one wave per call
        enrage.advance(135, &mut foe_fighter.stats);
        assert_eq!(enrage.apply_bleed_wave(&mut party, &mut foe_fighter), Some(1));
        assert_eq!(enrage.apply_bleed_wave(&mut party, &mut foe_fighter), Some(2));
        assert_eq!(enrage.apply_bleed_wave(&mut party, &mut foe_fighter), Some(3));
        assert_eq!(enrage.apply_bleed_wave(&mut party, &mut foe_fighter), None);
        assert_eq!(enrage.waves(), 3);

        assert_eq!(party[0].effects.dot_stacks(ENRAGE_BLEED_ID), 6);
        assert_eq!(party[1].effects.dot_stacks(ENRAGE_BLEED_ID), 0);
        assert_eq!(foe_fighter.effects.dot_stacks(ENRAGE_BLEED_ID), 6);
        assert_eq!(party[0].effects.dots[0].damage, 20);
        assert_eq!(party[0].effects.dots[0].turns, 10);
    }
}
