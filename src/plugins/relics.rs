//! Relic catalog. Relics stack: every copy the party holds strengthens the
//! relic's effect.

use crate::character::{Party, StatKey, Stats};
use crate::combat::triggers::{Side, TriggerEvent, TriggerRegistry};
use crate::core::constants::RELIC_CHOICE_COUNT;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

pub const SOUL_PRISM_ID: &str = "soul_prism";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relic {
    pub id: &'static str,
    pub name: &'static str,
    pub stars: u8,
    pub about: &'static str,
    /// Stat bonuses per stack.
    pub effects: &'static [(StatKey, f64)],
    /// Additive rare drop rate per stack.
    pub rdr: f64,
}

pub const RELICS: &[Relic] = &[
    Relic {
        id: "bent_dagger",
        name: "Bent Dagger",
        stars: 1,
        about: "+3% ATK",
        effects: &[(StatKey::Atk, 0.03)],
        rdr: 0.0,
    },
    Relic {
        id: "lucky_coin",
        name: "Lucky Coin",
        stars: 1,
        about: "+10% rare drop rate",
        effects: &[],
        rdr: 0.1,
    },
    Relic {
        id: "threadbare_cloak",
        name: "Threadbare Cloak",
        stars: 1,
        about: "+3% DEF",
        effects: &[(StatKey::Defense, 0.03)],
        rdr: 0.0,
    },
    Relic {
        id: "herbal_charm",
        name: "Herbal Charm",
        stars: 2,
        about: "+2% regain",
        effects: &[(StatKey::Regain, 0.02)],
        rdr: 0.0,
    },
    Relic {
        id: "shiny_pebble",
        name: "Shiny Pebble",
        stars: 2,
        about: "+5% mitigation",
        effects: &[(StatKey::Mitigation, 0.05)],
        rdr: 0.0,
    },
    Relic {
        id: "rusty_buckle",
        name: "Rusty Buckle",
        stars: 3,
        about: "+10% Max HP",
        effects: &[(StatKey::MaxHp, 0.10)],
        rdr: 0.0,
    },
    Relic {
        id: "golden_idol",
        name: "Golden Idol",
        stars: 3,
        about: "+50% rare drop rate",
        effects: &[],
        rdr: 0.5,
    },
    Relic {
        id: "omega_core",
        name: "Omega Core",
        stars: 4,
        about: "+15% ATK and DEF",
        effects: &[(StatKey::Atk, 0.15), (StatKey::Defense, 0.15)],
        rdr: 0.0,
    },
    Relic {
        id: SOUL_PRISM_ID,
        name: "Soul Prism",
        stars: 5,
        about: "Revives fallen allies at 1% HP after battles with reduced Max HP",
        effects: &[(StatKey::Defense, 0.05), (StatKey::Mitigation, 0.05)],
        rdr: 0.0,
    },
];

pub fn relic(id: &str) -> Option<&'static Relic> {
    RELICS.iter().find(|r| r.id == id)
}

/// Up to three relics of `stars` rank. Owned relics stay eligible.
pub fn relic_choices(_party: &Party, stars: u8, rng: &mut impl Rng) -> Vec<&'static Relic> {
    let mut pool: Vec<&'static Relic> = RELICS.iter().filter(|r| r.stars == stars).collect();
    pool.shuffle(rng);
    pool.truncate(RELIC_CHOICE_COUNT);
    pool
}

/// Applies held relics to a combat view and subscribes their triggers.
///
/// Rare drop rate bonuses replace whatever relic bonus `view.rdr` already
/// carried, so applying relics every battle never compounds.
pub fn apply_relics(view: &mut Party, triggers: &mut TriggerRegistry) {
    let mut held: Vec<&'static str> = Vec::new();
    for id in &view.relics {
        match relic(id) {
            Some(r) if !held.contains(&r.id) => held.push(r.id),
            Some(_) => {}
            None => warn!(relic = %id, "unknown relic ignored"),
        }
    }

    let mut rdr_bonus = 0.0;
    for id in held {
        let Some(relic) = relic(id) else {
            continue;
        };
        let stacks = view.relic_stacks(id) as f64;
        for member in view.members.iter_mut() {
            for &(key, fraction) in relic.effects {
                if let Err(err) = member.apply_bonus(key, fraction * stacks) {
                    warn!(relic = relic.id, error = %err, "relic bonus skipped");
                }
            }
        }
        rdr_bonus += relic.rdr * stacks;
        if id == SOUL_PRISM_ID {
            subscribe_soul_prism(triggers, stacks as u32);
        }
    }

    let base = view.rdr - view.relic_rdr;
    view.rdr = base + rdr_bonus;
    view.relic_rdr = rdr_bonus;
}

fn subscribe_soul_prism(triggers: &mut TriggerRegistry, stacks: u32) {
    let extra = stacks.saturating_sub(1) as f64;
    let penalty = (0.75 - 0.05 * extra).max(0.0);
    let buff = 0.05 + 0.02 * extra;
    triggers.subscribe(TriggerEvent::BattleEnd, move |member: &mut Stats, side| {
        if side != Side::Party || member.is_alive() {
            return;
        }
        revive(member, penalty, buff);
    });
}

fn revive(member: &mut Stats, penalty: f64, buff: f64) {
    member.max_hp = ((member.max_hp as f64 * (1.0 - penalty)) as u32).max(1);
    member.hp = ((member.max_hp as f64 * 0.01) as u32).max(1);
    for key in [StatKey::Defense, StatKey::Mitigation] {
        if let Err(err) = member.apply_bonus(key, buff) {
            warn!(member = member.label(), error = %err, "soul prism buff skipped");
        }
    }
    info!(member = member.label(), hp = member.hp, "soul prism revive");
}
