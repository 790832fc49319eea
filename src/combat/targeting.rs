//! Foe target selection.

use super::fighter::Fighter;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use tracing::warn;

/// Picks a living party member, weighted by `defense * mitigation`.
///
/// Tankier members draw more attacks. If every living member weighs zero (or
/// a weight is not finite) the pick is uniform. Returns `None` when nobody is
/// alive.
pub fn select_target(party: &[Fighter], rng: &mut impl Rng) -> Option<usize> {
    let alive: Vec<usize> = party
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_alive())
        .map(|(i, _)| i)
        .collect();
    if alive.is_empty() {
        return None;
    }

    let weights: Vec<f64> = alive
        .iter()
        .map(|&i| {
            let stats = &party[i].stats;
            stats.defense as f64 * stats.mitigation
        })
        .collect();

    match WeightedIndex::new(&weights) {
        Ok(dist) => Some(alive[dist.sample(rng)]),
        Err(err) => {
            warn!(error = %err, "degenerate target weights, picking uniformly");
            alive.choose(rng).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Stats;
    use rand::rngs::StdRng;

    fn member(id: &str, defense: u32, mitigation: f64) -> Fighter {
        Fighter::new(Stats {
            defense,
            mitigation,
            ..Stats::new(id, id)
        })
    }

    #[test]
    fn test_no_living_members() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut party = vec![member("a", 10, 1.0)];
        party[0].stats.hp = 0;
        assert_eq!(select_target(&party, &mut rng), None);
        assert_eq!(select_target(&[], &mut rng), None);
    }

    #[test]
    fn test_fallen_members_never_targeted() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut party = vec![member("a", 1000, 1.0), member("b", 1, 1.0)];
        party[0].stats.hp = 0;
        for _ in 0..100 {
            assert_eq!(select_target(&party, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_zero_weights_fall_back_to_uniform() {
        let mut rng = StdRng::seed_from_u64(1);
        let party = vec![member("a", 0, 1.0), member("b", 0, 1.0)];
        let mut seen = [0usize; 2];
        for _ in 0..200 {
            seen[select_target(&party, &mut rng).unwrap()] += 1;
        }
        assert!(seen[0] > 0 && seen[1] > 0);
    }

    #[test]
    fn test_zero_weight_member_skipped_when_others_weigh() {
        let mut rng = StdRng::seed_from_u64(1);
        let party = vec![member("a", 0, 1.0), member("b", 50, 1.0)];
        for _ in 0..100 {
            assert_eq!(select_target(&party, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_tanky_members_draw_more_attacks() {
        let mut rng = StdRng::seed_from_u64(9);
        let party = vec![member("tank", 300, 2.0), member("mage", 10, 1.0)];
        let mut tank_hits = 0;
        for _ in 0..1000 {
            if select_target(&party, &mut rng) == Some(0) {
                tank_hits += 1;
            }
        }
        assert!(tank_hits > 900);
    }
}
