//! Encounter configuration.

use crate::core::constants::*;
use std::time::Duration;

/// Tunables for a single encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleConfig {
    /// Minimum wall-clock length of every actor turn. Never affects outcome.
    pub turn_pacing: Duration,

    /// Turns before enrage engages in a normal battle room.
    pub enrage_turns_normal: u32,

    /// Turns before enrage engages in a boss room.
    pub enrage_turns_boss: u32,

    /// Fractional foe attack gained per enrage stack.
    pub enrage_atk_per_stack: f64,

    /// Enrage stacks between bleed waves.
    pub bleed_interval: u32,

    /// Bleed damage per tick as a fraction of the target's max HP.
    pub bleed_fraction: f64,

    /// Duration of each bleed stack.
    pub bleed_turns: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            turn_pacing: Duration::from_millis(TURN_PACING_MS),
            enrage_turns_normal: ENRAGE_TURNS_NORMAL,
            enrage_turns_boss: ENRAGE_TURNS_BOSS,
            enrage_atk_per_stack: ENRAGE_ATK_PER_STACK,
            bleed_interval: ENRAGE_BLEED_INTERVAL,
            bleed_fraction: ENRAGE_BLEED_FRACTION,
            bleed_turns: ENRAGE_BLEED_TURNS,
        }
    }
}

impl BattleConfig {
    /// No pacing, for tests and simulation.
    pub fn instant() -> Self {
        Self {
            turn_pacing: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Custom pacing with default balance.
    pub fn paced(turn_pacing: Duration) -> Self {
        Self {
            turn_pacing,
            ..Default::default()
        }
    }

    pub fn enrage_threshold(&self, boss: bool) -> u32 {
        if boss {
            self.enrage_turns_boss
        } else {
            self.enrage_turns_normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing() {
        assert_eq!(BattleConfig::default().turn_pacing, Duration::from_millis(500));
        assert_eq!(BattleConfig::instant().turn_pacing, Duration::ZERO);
    }

    #[test]
    fn test_enrage_threshold_by_tier() {
        let config = BattleConfig::default();
        assert_eq!(config.enrage_threshold(false), 100);
        assert_eq!(config.enrage_threshold(true), 500);
    }
}
