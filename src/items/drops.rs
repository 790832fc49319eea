//! Post-battle reward rolls.
//!
//! Every roll is independent and never retried. Rare drop rate (rdr) widens
//! relic odds, star upgrades, gold, item counts and ticket odds, but never
//! the star rank of upgrade items.

use super::types::UpgradeItem;
use crate::core::constants::*;
use crate::plugins::damage_types::ELEMENTS;
use crate::rooms::node::{MapNode, RoomTier};
use rand::seq::SliceRandom;
use rand::Rng;

pub fn pick_card_stars(tier: RoomTier, rng: &mut impl Rng) -> u8 {
    let roll = rng.gen::<f64>();
    match tier {
        RoomTier::Boss | RoomTier::FloorBoss => {
            if roll < 0.60 {
                3
            } else if roll < 0.85 {
                4
            } else {
                5
            }
        }
        RoomTier::Elevated => {
            if roll < 0.40 {
                1
            } else if roll < 0.70 {
                2
            } else if roll < 0.7015 {
                3
            } else if roll < 0.7025 {
                4
            } else {
                5
            }
        }
        RoomTier::Normal => {
            if roll < 0.80 {
                1
            } else {
                2
            }
        }
    }
}

pub fn relic_drop_chance(tier: RoomTier, rdr: f64) -> f64 {
    let base = if tier.is_boss() {
        RELIC_BASE_CHANCE_BOSS
    } else {
        RELIC_BASE_CHANCE
    };
    (base * rdr.max(0.0)).min(1.0)
}

pub fn roll_relic_drop(tier: RoomTier, rdr: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < relic_drop_chance(tier, rdr)
}

pub fn pick_relic_stars(tier: RoomTier, rng: &mut impl Rng) -> u8 {
    let roll = rng.gen::<f64>();
    if tier.is_boss() {
        if roll < 0.6 {
            3
        } else if roll < 0.9 {
            4
        } else {
            5
        }
    } else if roll < 0.7 {
        1
    } else if roll < 0.9 {
        2
    } else {
        3
    }
}

/// Extreme rdr can push a card or relic up to two extra stars.
///
/// Each threshold needs 1000x the rdr of the last. Stops at 5 stars, at the
/// first threshold rdr falls short of, or on the first failed roll.
pub fn apply_rdr_to_stars(mut stars: u8, rdr: f64, rng: &mut impl Rng) -> u8 {
    for threshold in RDR_STAR_THRESHOLDS {
        if stars >= MAX_STARS || rdr < threshold {
            break;
        }
        let chance = (rdr / (threshold * 10.0)).min(RDR_STAR_CHANCE_CAP);
        if rng.gen::<f64>() < chance {
            stars += 1;
        } else {
            break;
        }
    }
    stars
}

/// Star band of upgrade items for a room tier.
pub fn item_star_band(tier: RoomTier) -> (u8, u8) {
    match tier {
        RoomTier::FloorBoss => (3, 4),
        RoomTier::Boss | RoomTier::Elevated => (1, 3),
        RoomTier::Normal => (1, 2),
    }
}

/// Upgrade item stars: deeper floors, later loops and higher pressure raise
/// the rank within the tier's band.
pub fn pick_item_stars(tier: RoomTier, node: &MapNode) -> u8 {
    let (low, high) = item_star_band(tier);
    let base = low as i64
        + (node.floor as i64 - 1).div_euclid(20)
        + (node.loop_count as i64 - 1)
        + node.pressure as i64 / 10;
    base.clamp(low as i64, high as i64) as u8
}

fn gold_tier(tier: RoomTier) -> (f64, f64, f64) {
    match tier {
        RoomTier::FloorBoss => GOLD_FLOOR_BOSS,
        RoomTier::Boss | RoomTier::Elevated => GOLD_ELEVATED,
        RoomTier::Normal => GOLD_NORMAL,
    }
}

pub fn calc_gold(tier: RoomTier, loop_count: u32, rdr: f64, rng: &mut impl Rng) -> u64 {
    let (base, low, high) = gold_tier(tier);
    let mult = rng.gen_range(low..=high);
    let gold = base * loop_count as f64 * mult * rdr;
    if gold.is_finite() && gold > 0.0 {
        gold as u64
    } else {
        0
    }
}

/// `floor(rdr)` items plus one more with probability `frac(rdr)`.
pub fn roll_item_count(rdr: f64, rng: &mut impl Rng) -> u32 {
    if !rdr.is_finite() || rdr <= 0.0 {
        return 0;
    }
    let whole = rdr.floor();
    let extra = rng.gen::<f64>() < rdr - whole;
    whole.min(u32::MAX as f64) as u32 + u32::from(extra)
}

pub fn roll_items(tier: RoomTier, node: &MapNode, rdr: f64, rng: &mut impl Rng) -> Vec<UpgradeItem> {
    let count = roll_item_count(rdr, rng);
    let stars = pick_item_stars(tier, node);
    (0..count)
        .map(|_| UpgradeItem {
            id: ELEMENTS
                .choose(rng)
                .map(|e| e.to_lowercase())
                .unwrap_or_default(),
            stars,
        })
        .collect()
}

pub fn roll_ticket(rdr: f64, rng: &mut impl Rng) -> Option<UpgradeItem> {
    (rng.gen::<f64>() < TICKET_CHANCE_PER_RDR * rdr).then(|| UpgradeItem {
        id: TICKET_ITEM_ID.to_string(),
        stars: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_card_stars_by_tier() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert!((3..=5).contains(&pick_card_stars(RoomTier::Boss, &mut rng)));
            assert!((1..=2).contains(&pick_card_stars(RoomTier::Normal, &mut rng)));
            assert!((1..=5).contains(&pick_card_stars(RoomTier::Elevated, &mut rng)));
        }
    }

    #[test]
    fn test_card_star_distribution_boss() {
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 10_000;
        let threes = (0..trials)
            .filter(|_| pick_card_stars(RoomTier::Boss, &mut rng) == 3)
            .count();
        let rate = threes as f64 / trials as f64;
        assert!((0.57..0.63).contains(&rate), "3 star rate {rate}");
    }

    #[test]
    fn test_relic_chance_monotonic_and_capped() {
        let mut last = 0.0;
        for step in 0..100 {
            let rdr = step as f64 * 0.25;
            let chance = relic_drop_chance(RoomTier::Normal, rdr);
            assert!(chance >= last);
            assert!(chance <= 1.0);
            last = chance;
        }
        assert_eq!(relic_drop_chance(RoomTier::Boss, 1.0), 0.5);
        assert_eq!(relic_drop_chance(RoomTier::Boss, 5.0), 1.0);
        assert_eq!(relic_drop_chance(RoomTier::Normal, 1.0), 0.1);
    }

    #[test]
    fn test_relic_stars_by_tier() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert!((3..=5).contains(&pick_relic_stars(RoomTier::FloorBoss, &mut rng)));
            assert!((1..=3).contains(&pick_relic_stars(RoomTier::Elevated, &mut rng)));
        }
    }

    #[test]
    fn test_rdr_stars_need_threshold() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(apply_rdr_to_stars(3, 9.99, &mut rng), 3);
            assert_eq!(apply_rdr_to_stars(5, 1e9, &mut rng), 5);
        }
    }

    #[test]
    fn test_rdr_stars_capped_at_two_upgrades() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let stars = apply_rdr_to_stars(1, 1e9, &mut rng);
            assert!((1..=3).contains(&stars));
        }
    }

    #[test]
    fn test_rdr_stars_mostly_upgrade_at_huge_rdr() {
        let mut rng = StdRng::seed_from_u64(42);
        let upgraded = (0..1000)
            .filter(|_| apply_rdr_to_stars(3, 1e9, &mut rng) == 5)
            .count();
        assert!(upgraded > 950);
    }

    #[test]
    fn test_item_stars_bands() {
        let node = MapNode::new(1, 1, 1, 0);
        assert_eq!(pick_item_stars(RoomTier::Normal, &node), 1);
        assert_eq!(pick_item_stars(RoomTier::Boss, &node), 1);
        assert_eq!(pick_item_stars(RoomTier::FloorBoss, &node), 3);

        let deep = MapNode::new(41, 1, 3, 30);
        assert_eq!(pick_item_stars(RoomTier::Normal, &deep), 2);
        assert_eq!(pick_item_stars(RoomTier::Elevated, &deep), 3);
        assert_eq!(pick_item_stars(RoomTier::FloorBoss, &deep), 4);
    }

    #[test]
    fn test_item_stars_never_below_band() {
        // Loop 0 would push the rank under the band's floor
        let node = MapNode::new(1, 1, 0, 0);
        assert_eq!(pick_item_stars(RoomTier::FloorBoss, &node), 3);
        assert_eq!(pick_item_stars(RoomTier::Normal, &node), 1);
    }

    #[test]
    fn test_gold_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let gold = calc_gold(RoomTier::Normal, 1, 1.0, &mut rng);
            assert!((5..=6).contains(&gold), "gold {gold}");
            let gold = calc_gold(RoomTier::FloorBoss, 2, 1.0, &mut rng);
            assert!((820..=1700).contains(&gold), "gold {gold}");
        }
        assert_eq!(calc_gold(RoomTier::Boss, 0, 1.0, &mut rng), 0);
        assert_eq!(calc_gold(RoomTier::Boss, 1, f64::NAN, &mut rng), 0);
    }

    #[test]
    fn test_item_count_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for rdr in [0.0, 0.3, 1.0, 1.5, 2.75, 10.0] {
            for _ in 0..100 {
                let count = roll_item_count(rdr, &mut rng) as f64;
                assert!(count >= rdr.floor() && count <= rdr.ceil());
            }
        }
    }

    #[test]
    fn test_items_tagged_with_elements() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = roll_items(RoomTier::Normal, &MapNode::default(), 3.0, &mut rng);
        assert_eq!(items.len(), 3);
        for item in &items {
            assert!(ELEMENTS.iter().any(|e| e.to_lowercase() == item.id));
            assert_eq!(item.stars, 1);
        }
    }

    #[test]
    fn test_ticket_odds() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!((0..100).all(|_| roll_ticket(0.0, &mut rng).is_none()));
        let ticket = roll_ticket(10.0, &mut rng).unwrap();
        assert_eq!(ticket.id, TICKET_ITEM_ID);
        assert_eq!(ticket.stars, 0);
    }
}
