//! Foe stat scaling from room context.

use super::node::MapNode;
use crate::character::{StatKey, Stats};
use crate::core::constants::*;
use rand::Rng;
use tracing::warn;

/// Combined multiplier from room position and strength. Each axis adds
/// nothing at or below 1; pressure below 1 counts as 1.
pub fn base_multiplier(node: &MapNode, strength: f64) -> f64 {
    let axis = |value: u32, step: f64| 1.0 + step * value.saturating_sub(1) as f64;
    let floor_mult = axis(node.floor, FLOOR_STEP);
    let index_mult = axis(node.index, INDEX_STEP);
    let loop_mult = axis(node.loop_count, LOOP_STEP);
    let pressure_mult = node.pressure.max(1) as f64;
    strength * floor_mult * index_mult * loop_mult * pressure_mult
}

/// Minimum foe level for a room: one level per two rooms.
pub fn level_floor(index: u32) -> u32 {
    index.max(1).div_ceil(2).max(1)
}

/// Scales `stats` in place for a foe met at `node`.
///
/// Every scalable stat gets its own jitter. A stat whose scaled value cannot
/// be stored keeps its previous value; the stats left untouched that way are
/// returned.
pub fn scale_stats(
    stats: &mut Stats,
    node: &MapNode,
    strength: f64,
    rng: &mut impl Rng,
) -> Vec<StatKey> {
    let base = base_multiplier(node, strength);
    let mut skipped = Vec::new();

    for key in StatKey::SCALABLE {
        let jitter = 1.0 + rng.gen_range(-STAT_JITTER..=STAT_JITTER);
        let scaled = stats.get(key) * base * jitter;
        if let Err(err) = stats.set(key, scaled) {
            warn!(foe = stats.label(), error = %err, "stat left unscaled");
            skipped.push(key);
        }
    }

    stats.level = stats.level.max(level_floor(node.index));

    let room = node.index.max(1) as f64;
    let target_base = HP_FLOOR_PER_ROOM as f64 * room;
    let low = (target_base * HP_FLOOR_LOW).min(u32::MAX as f64) as u32;
    let high = (target_base * HP_FLOOR_HIGH).min(u32::MAX as f64) as u32;
    let target = rng.gen_range(low..=high.max(low.saturating_add(1)));
    stats.max_hp = stats.max_hp.max(target);
    stats.hp = stats.max_hp;

    stats.crit_damage = stats.crit_damage.max(MIN_FOE_CRIT_DAMAGE);
    skipped
}
