//! The turn loop.
//!
//! [`Combat`] drives one encounter between a party and a single foe until one
//! side falls. It owns transient copies of every combatant; the caller
//! reconciles the returned [`CombatReport`] onto persistent state.
//!
//! Round structure: every living party member acts in order, then the foe
//! acts once. Only party turns advance the global turn counter, which in
//! turn drives regain and enrage.

use super::config::BattleConfig;
use super::enrage::{Enrage, EnrageState};
use super::fighter::Fighter;
use super::progress::ProgressSink;
use super::snapshot::{BattleSnapshot, Outcome};
use super::targeting::select_target;
use super::triggers::{Side, TriggerEvent, TriggerRegistry};
use crate::core::combat_math::encounter_exp;
use crate::core::constants::{ENRAGE_BLEED_ID, SLIME_EXP_BONUS};
use crate::plugins::damage_types::{ActionContext, DamageTypeRegistry};
use crate::plugins::foes::is_slime;
use rand::Rng;
use std::slice;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Everything the loop hands back once a side has fallen.
#[derive(Debug, Clone)]
pub struct CombatReport {
    pub party: Vec<Fighter>,
    pub foe: Fighter,
    pub victory: bool,
    pub exp_reward: u64,
    pub turns: u32,
    pub enrage: EnrageState,
    /// The slain foe was a slime; the persistent party earns the same
    /// experience-rate bonus the combat party already received.
    pub slime_slain: bool,
}

pub struct Combat<'a> {
    party: Vec<Fighter>,
    foe: Fighter,
    enrage: Enrage,
    turn: u32,
    room_index: u32,
    rdr: f64,
    config: &'a BattleConfig,
    damage_types: &'a DamageTypeRegistry,
    triggers: &'a mut TriggerRegistry,
    progress: &'a mut dyn ProgressSink,
}

impl<'a> Combat<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        party: Vec<Fighter>,
        foe: Fighter,
        boss: bool,
        room_index: u32,
        rdr: f64,
        config: &'a BattleConfig,
        damage_types: &'a DamageTypeRegistry,
        triggers: &'a mut TriggerRegistry,
        progress: &'a mut dyn ProgressSink,
    ) -> Self {
        let enrage = Enrage::new(config, boss, foe.stats.atk);
        Self {
            party,
            foe,
            enrage,
            turn: 0,
            room_index,
            rdr,
            config,
            damage_types,
            triggers,
            progress,
        }
    }

    pub async fn run<R: Rng + Send>(mut self, rng: &mut R) -> CombatReport {
        self.triggers
            .trigger(TriggerEvent::BattleStart, &mut self.foe.stats, Side::Foe);
        for member in self.party.iter_mut() {
            self.triggers
                .trigger(TriggerEvent::BattleStart, &mut member.stats, Side::Party);
        }
        info!(
            foe = self.foe.stats.label(),
            party = ?self.party.iter().map(|m| m.stats.id.as_str()).collect::<Vec<_>>(),
            "battle start"
        );
        self.emit().await;

        'battle: while self.foe.is_alive() && self.party_alive() {
            for index in 0..self.party.len() {
                if !self.party[index].is_alive() {
                    continue;
                }
                self.party_turn(index, rng).await;
                if !self.foe.is_alive() {
                    break 'battle;
                }
            }
            if self.party_alive() {
                self.foe_turn(rng).await;
            }
        }

        let victory = !self.foe.is_alive();
        let mut exp_reward = 0;
        let mut slime_slain = false;
        if victory {
            exp_reward = encounter_exp(self.foe.stats.level, self.room_index);
            slime_slain = is_slime(&self.foe.stats);
            if slime_slain {
                for member in self.party.iter_mut() {
                    member.stats.exp_multiplier += SLIME_EXP_BONUS;
                }
            }
        }

        self.triggers
            .trigger(TriggerEvent::BattleEnd, &mut self.foe.stats, Side::Foe);
        for member in self.party.iter_mut() {
            self.triggers
                .trigger(TriggerEvent::BattleEnd, &mut member.stats, Side::Party);
        }
        info!(victory, turns = self.turn, exp_reward, "battle end");

        CombatReport {
            enrage: self.enrage.state(),
            party: self.party,
            foe: self.foe,
            victory,
            exp_reward,
            turns: self.turn,
            slime_slain,
        }
    }

    async fn party_turn<R: Rng + Send>(&mut self, index: usize, rng: &mut R) {
        let started = Instant::now();
        self.turn += 1;
        self.enrage.advance(self.turn, &mut self.foe.stats);

        self.triggers.trigger(
            TriggerEvent::TurnStart,
            &mut self.party[index].stats,
            Side::Party,
        );
        self.party[index].stats.maybe_regain(self.turn);
        let member = &mut self.party[index];
        member
            .effects
            .tick(&mut member.stats, &mut self.foe.effects, ENRAGE_BLEED_ID);

        if !self.party[index].is_alive() {
            self.end_turn_party(index);
            hold_turn(self.config.turn_pacing, started).await;
            return;
        }

        let registry = self.damage_types;
        let damage_type = registry.get_or_generic(&self.party[index].stats.damage_type);
        let mut acted = self.party[index].effects.on_action();
        if acted {
            acted = damage_type.on_action(
                ActionContext {
                    actor: index,
                    allies: self.party.as_mut_slice(),
                    enemies: slice::from_mut(&mut self.foe),
                },
                rng,
            );
        }
        if !acted {
            self.end_turn_party(index);
            self.emit().await;
            hold_turn(self.config.turn_pacing, started).await;
            return;
        }

        let attacker = &self.party[index].stats;
        let dealt = self.foe.stats.apply_damage(attacker.atk, attacker, rng);
        debug!(
            attacker = attacker.label(),
            defender = self.foe.stats.label(),
            dealt,
            "hit"
        );
        self.foe.effects.maybe_inflict_dot(
            &mut self.foe.stats,
            &self.party[index].stats,
            damage_type,
            dealt,
            rng,
        );
        self.party[index].stats.damage_dealt += dealt as u64;
        self.enrage.apply_bleed_wave(&mut self.party, &mut self.foe);
        self.end_turn_party(index);
        self.emit().await;
        hold_turn(self.config.turn_pacing, started).await;
    }

    async fn foe_turn<R: Rng + Send>(&mut self, rng: &mut R) {
        let started = Instant::now();
        let Some(target) = select_target(&self.party, rng) else {
            return;
        };

        self.triggers
            .trigger(TriggerEvent::TurnStart, &mut self.foe.stats, Side::Foe);
        self.foe.stats.maybe_regain(self.turn);
        self.foe.effects.tick(
            &mut self.foe.stats,
            &mut self.party[target].effects,
            ENRAGE_BLEED_ID,
        );

        if !self.foe.is_alive() {
            self.end_turn_foe();
            hold_turn(self.config.turn_pacing, started).await;
            return;
        }

        let registry = self.damage_types;
        let damage_type = registry.get_or_generic(&self.foe.stats.damage_type);
        let mut acted = self.foe.effects.on_action();
        if acted {
            acted = damage_type.on_action(
                ActionContext {
                    actor: 0,
                    allies: slice::from_mut(&mut self.foe),
                    enemies: self.party.as_mut_slice(),
                },
                rng,
            );
        }
        // An ability may have felled the chosen target
        if !acted || !self.party[target].is_alive() {
            self.end_turn_foe();
            self.emit().await;
            hold_turn(self.config.turn_pacing, started).await;
            return;
        }

        let victim = &mut self.party[target];
        let dealt = victim
            .stats
            .apply_damage(self.foe.stats.atk, &self.foe.stats, rng);
        debug!(
            attacker = self.foe.stats.label(),
            defender = victim.stats.label(),
            dealt,
            "hit"
        );
        victim.effects.maybe_inflict_dot(
            &mut victim.stats,
            &self.foe.stats,
            damage_type,
            dealt,
            rng,
        );
        self.foe.stats.damage_dealt += dealt as u64;
        self.enrage.apply_bleed_wave(&mut self.party, &mut self.foe);
        self.end_turn_foe();
        self.emit().await;
        hold_turn(self.config.turn_pacing, started).await;
    }

    fn end_turn_party(&mut self, index: usize) {
        self.triggers.trigger(
            TriggerEvent::TurnEnd,
            &mut self.party[index].stats,
            Side::Party,
        );
    }

    fn end_turn_foe(&mut self) {
        self.triggers
            .trigger(TriggerEvent::TurnEnd, &mut self.foe.stats, Side::Foe);
    }

    fn party_alive(&self) -> bool {
        self.party.iter().any(Fighter::is_alive)
    }

    fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            result: Outcome::Battle,
            party: self.party.iter().map(|m| m.stats.clone()).collect(),
            foes: vec![self.foe.stats.clone()],
            enrage: self.enrage.state(),
            rdr: self.rdr,
            turn: self.turn,
        }
    }

    async fn emit(&mut self) {
        let snapshot = self.snapshot();
        self.progress.emit(snapshot).await;
    }
}

/// Holds a turn open until `pacing` has elapsed since `started`.
async fn hold_turn(pacing: Duration, started: Instant) {
    if pacing.is_zero() {
        return;
    }
    let elapsed = started.elapsed();
    if elapsed < pacing {
        sleep(pacing - elapsed).await;
    }
}
