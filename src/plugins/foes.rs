//! Foe roster and encounter foe selection.

use super::damage_types::{DamageTypeRegistry, GENERIC};
use super::players::PLAYERS;
use crate::character::{Party, Stats};
use crate::error::{AutofighterError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const SLIME_ID: &str = "slime";

/// Foes that only ever appear as enemies.
const FOE_IDS: [&str; 1] = [SLIME_ID];

fn slime() -> Stats {
    Stats {
        hp: 100,
        max_hp: 100,
        atk: 20,
        defense: 10,
        ..Stats::new(SLIME_ID, "Slime")
    }
}

/// Base stats for a foe id. Player ids yield their mirror foe.
pub fn foe_stats(id: &str) -> Result<Stats> {
    if id == SLIME_ID {
        return Ok(slime());
    }
    PLAYERS
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.stats())
        .ok_or_else(|| AutofighterError::UnknownFoe(id.to_string()))
}

pub fn is_slime(stats: &Stats) -> bool {
    stats.label().to_lowercase().contains(SLIME_ID)
}

/// Foe ids eligible against `party`: roster foes and mirrors of players
/// who are not already in the party.
pub fn foe_candidates(party: &Party) -> Vec<&'static str> {
    let party_ids: HashSet<&str> = party.members.iter().map(|m| m.id.as_str()).collect();
    let mut candidates: Vec<&'static str> = FOE_IDS
        .iter()
        .copied()
        .filter(|id| !party_ids.contains(id))
        .collect();
    for player in PLAYERS.iter() {
        if !party_ids.contains(player.id) && !candidates.contains(&player.id) {
            candidates.push(player.id);
        }
    }
    candidates
}

/// Picks the foe for a battle and settles its element.
///
/// Luna always fights unaligned. Slimes and unaligned foes roll a random
/// element each encounter; everyone else keeps their own.
pub fn choose_foe(party: &Party, damage_types: &DamageTypeRegistry, rng: &mut impl Rng) -> Stats {
    let candidates = foe_candidates(party);
    let id = match candidates.choose(rng) {
        Some(id) => *id,
        None => {
            warn!("no foe candidates, falling back to slime");
            SLIME_ID
        }
    };
    let mut foe = foe_stats(id).unwrap_or_else(|_| slime());

    let label = foe.label().to_lowercase();
    if label.contains("luna") {
        foe.damage_type = GENERIC.to_string();
    } else if label.contains(SLIME_ID) || foe.damage_type == GENERIC {
        foe.damage_type = damage_types.random_element(rng).to_string();
    }
    debug!(foe = %foe.id, element = %foe.damage_type, "foe chosen");
    foe
}
