//! Shared combat math functions for the turn loop and the simulator.
//!
//! These pure functions calculate combat outcomes without side effects.

use super::constants::*;
use rand::Rng;

/// Roll for critical hit.
///
/// # Arguments
/// * `crit_rate` - Chance to crit as a fraction (0.0-1.0+)
/// * `rng` - Random number generator
pub fn roll_crit(crit_rate: f64, rng: &mut impl Rng) -> bool {
    crit_rate > 0.0 && rng.gen::<f64>() < crit_rate
}

/// Calculate actual damage taken after defense and mitigation.
///
/// Defense follows a diminishing curve (`100 / (100 + defense)`), mitigation
/// divides what is left. Any positive hit deals at least 1 damage.
pub fn mitigate_damage(raw_damage: f64, defense: u32, mitigation: f64) -> u32 {
    if !raw_damage.is_finite() || raw_damage <= 0.0 {
        return 0;
    }
    let after_defense = raw_damage * DEFENSE_CURVE / (DEFENSE_CURVE + defense as f64);
    let after_mitigation = if mitigation > 0.0 {
        after_defense / mitigation
    } else {
        after_defense
    };
    (after_mitigation.min(u32::MAX as f64) as u32).max(1)
}

/// Experience needed to advance from `level` to `level + 1`.
/// XP for level N = XP_CURVE_BASE * N^XP_CURVE_EXPONENT
pub fn exp_to_level(level: u32) -> u64 {
    (XP_CURVE_BASE * (level.max(1) as f64).powf(XP_CURVE_EXPONENT)) as u64
}

/// Experience granted for slaying a foe in the room at `room_index`.
pub fn encounter_exp(foe_level: u32, room_index: u32) -> u64 {
    foe_level as u64 * EXP_PER_FOE_LEVEL + EXP_PER_ROOM_INDEX * room_index as u64
}

/// Per-tick damage of an enrage bleed stack on a combatant with `max_hp`.
/// `fraction` is normally [`ENRAGE_BLEED_FRACTION`].
pub fn enrage_bleed_damage(max_hp: u32, fraction: f64) -> u32 {
    (max_hp.max(1) as f64 * fraction) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mitigate_damage() {
        // 100 defense halves the hit
        assert_eq!(mitigate_damage(200.0, 100, 1.0), 100);
        // No defense, mitigation 2.0 halves the hit
        assert_eq!(mitigate_damage(200.0, 0, 2.0), 100);
        // Positive hits always land for at least 1
        assert_eq!(mitigate_damage(1.0, 10_000, 10.0), 1);
        // Zero or invalid input deals nothing
        assert_eq!(mitigate_damage(0.0, 0, 1.0), 0);
        assert_eq!(mitigate_damage(f64::NAN, 0, 1.0), 0);
    }

    #[test]
    fn test_mitigate_damage_zero_mitigation_is_ignored() {
        assert_eq!(mitigate_damage(100.0, 0, 0.0), 100);
    }

    #[test]
    fn test_roll_crit_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert!(roll_crit(1.0, &mut rng));
            assert!(!roll_crit(0.0, &mut rng));
        }
    }

    #[test]
    fn test_exp_to_level_curve() {
        assert_eq!(exp_to_level(1), 100);
        assert!((exp_to_level(4) as i64 - 800).abs() <= 1);
        assert!(exp_to_level(10) > exp_to_level(9));
        // Level 0 is treated as level 1
        assert_eq!(exp_to_level(0), exp_to_level(1));
    }

    #[test]
    fn test_encounter_exp() {
        assert_eq!(encounter_exp(1, 1), 17);
        assert_eq!(encounter_exp(5, 4), 80);
    }

    #[test]
    fn test_enrage_bleed_damage() {
        assert_eq!(enrage_bleed_damage(1000, ENRAGE_BLEED_FRACTION), 20);
        assert_eq!(enrage_bleed_damage(0, ENRAGE_BLEED_FRACTION), 0);
        assert_eq!(enrage_bleed_damage(49, ENRAGE_BLEED_FRACTION), 0);
        assert_eq!(enrage_bleed_damage(1000, 0.5), 500);
    }
}
