//! Pressure and floor-boss escalation.
//!
//! Pressure is a run-level difficulty dial. Floor bosses scale with both
//! pressure and the loop count on top of the regular foe scaler.

use crate::character::Stats;
use serde::{Deserialize, Serialize};

// =============================================================================
// PRESSURE
// =============================================================================

/// Enemy stat multiplier per pressure point.
pub const PRESSURE_STAT_STEP: f64 = 0.05;

/// Reward multiplier per pressure point.
pub const PRESSURE_REWARD_STEP: f64 = 0.1;

/// Additive mechanic bonus per pressure point.
pub const PRESSURE_MECHANIC_STEP: f64 = 0.05;

pub fn stat_multiplier(pressure: u32) -> f64 {
    1.0 + PRESSURE_STAT_STEP * pressure as f64
}

pub fn reward_multiplier(pressure: u32) -> f64 {
    1.0 + PRESSURE_REWARD_STEP * pressure as f64
}

pub fn mechanic_bonus(pressure: u32) -> f64 {
    PRESSURE_MECHANIC_STEP * pressure as f64
}

// =============================================================================
// FLOOR BOSS
// =============================================================================

/// Base factor applied to floor boss core stats before pressure and loop.
pub const FLOOR_BOSS_STAT_FACTOR: f64 = 100.0;

/// Per-loop compounding growth of floor boss stats.
pub const FLOOR_BOSS_LOOP_GROWTH: f64 = 1.2;

/// Attack bonus added per loop.
pub const FLOOR_BOSS_ATTACK_PER_LOOP: f64 = 0.1;

/// Ticket reward ceiling for a floor boss.
pub const FLOOR_BOSS_MAX_TICKETS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorBossMechanics {
    /// Fractional attack increase, e.g. 0.3 for +30%.
    pub attack_bonus: f64,
    pub extra_actions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorBossRewards {
    pub gold: u64,
    pub tickets: u32,
}

/// Scales the core stats (hp, max_hp, atk, defense) of a floor boss.
/// Every other field is carried over from `base`.
pub fn floor_boss_stats(base: &Stats, loop_count: u32, pressure: u32) -> Stats {
    let factor = FLOOR_BOSS_STAT_FACTOR
        * stat_multiplier(pressure)
        * FLOOR_BOSS_LOOP_GROWTH.powi(loop_count as i32);
    // Float-to-int casts saturate, so huge loops pin at u32::MAX
    let scale = |value: u32| (value as f64 * factor) as u32;
    Stats {
        hp: scale(base.hp),
        max_hp: scale(base.max_hp),
        atk: scale(base.atk),
        defense: scale(base.defense),
        ..base.clone()
    }
}

pub fn floor_boss_mechanics(loop_count: u32, pressure: u32) -> FloorBossMechanics {
    FloorBossMechanics {
        attack_bonus: mechanic_bonus(pressure) + FLOOR_BOSS_ATTACK_PER_LOOP * loop_count as f64,
        extra_actions: loop_count / 2,
    }
}

pub fn floor_boss_rewards(base_gold: u64, loop_count: u32, pressure: u32) -> FloorBossRewards {
    let gold = base_gold as f64 * (2.0 + 0.5 * loop_count as f64) * reward_multiplier(pressure);
    let tickets = (1 + pressure / 20 + loop_count).min(FLOOR_BOSS_MAX_TICKETS);
    FloorBossRewards {
        gold: gold as u64,
        tickets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Stats {
        Stats {
            hp: 100,
            max_hp: 100,
            atk: 10,
            defense: 5,
            ..Stats::new("boss", "Boss")
        }
    }

    #[test]
    fn test_pressure_multipliers() {
        assert_eq!(stat_multiplier(0), 1.0);
        assert!((stat_multiplier(10) - 1.5).abs() < 1e-9);
        assert!((reward_multiplier(10) - 2.0).abs() < 1e-9);
        assert!((mechanic_bonus(4) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_floor_boss_stats_escalate_with_loop_and_pressure() {
        let low = floor_boss_stats(&base(), 0, 0);
        let high = floor_boss_stats(&base(), 1, 10);
        assert_eq!(low.hp, 10_000);
        assert!(high.hp > low.hp);
        assert!(high.atk > low.atk);
        assert!(high.defense > low.defense);
    }

    #[test]
    fn test_floor_boss_stats_keep_identity() {
        let scaled = floor_boss_stats(&base(), 2, 3);
        assert_eq!(scaled.id, "boss");
        assert_eq!(scaled.crit_rate, base().crit_rate);
        assert_eq!(scaled.level, 1);
    }

    #[test]
    fn test_floor_boss_stats_saturate() {
        let scaled = floor_boss_stats(&base(), 500, 1000);
        assert_eq!(scaled.hp, u32::MAX);
    }

    #[test]
    fn test_floor_boss_mechanics_escalate() {
        let base = floor_boss_mechanics(0, 0);
        let escalated = floor_boss_mechanics(3, 4);
        assert!(escalated.attack_bonus > base.attack_bonus);
        assert_eq!(base.extra_actions, 0);
        assert_eq!(escalated.extra_actions, 1);
    }

    #[test]
    fn test_floor_boss_rewards_grow() {
        let base = floor_boss_rewards(100, 0, 0);
        let boosted = floor_boss_rewards(100, 1, 10);
        assert_eq!(base, FloorBossRewards { gold: 200, tickets: 1 });
        assert!(boosted.gold > base.gold);
        assert!(boosted.tickets >= base.tickets);
        assert_eq!(floor_boss_rewards(100, 9, 200).tickets, FLOOR_BOSS_MAX_TICKETS);
    }
}
