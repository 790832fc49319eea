//! Card catalog. Cards are permanent party-wide stat bonuses, applied to the
//! combat view at the start of every battle.

use crate::character::{StatKey, Stats};
use crate::character::Party;
use crate::core::constants::CARD_CHOICE_COUNT;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Card {
    pub id: &'static str,
    pub name: &'static str,
    pub stars: u8,
    pub about: &'static str,
    pub effects: &'static [(StatKey, f64)],
}

pub const CARDS: &[Card] = &[
    Card {
        id: "micro_blade",
        name: "Micro Blade",
        stars: 1,
        about: "+3% ATK",
        effects: &[(StatKey::Atk, 0.03)],
    },
    Card {
        id: "sturdy_boots",
        name: "Sturdy Boots",
        stars: 1,
        about: "+3% DEF",
        effects: &[(StatKey::Defense, 0.03)],
    },
    Card {
        id: "vital_core",
        name: "Vital Core",
        stars: 1,
        about: "+3% Max HP",
        effects: &[(StatKey::MaxHp, 0.03)],
    },
    Card {
        id: "sharp_eye",
        name: "Sharp Eye",
        stars: 1,
        about: "+3% crit rate",
        effects: &[(StatKey::CritRate, 0.03)],
    },
    Card {
        id: "balanced_diet",
        name: "Balanced Diet",
        stars: 2,
        about: "+5% Max HP and +5% DEF",
        effects: &[(StatKey::MaxHp, 0.05), (StatKey::Defense, 0.05)],
    },
    Card {
        id: "iron_guard",
        name: "Iron Guard",
        stars: 2,
        about: "+10% DEF",
        effects: &[(StatKey::Defense, 0.10)],
    },
    Card {
        id: "keen_edge",
        name: "Keen Edge",
        stars: 2,
        about: "+8% ATK",
        effects: &[(StatKey::Atk, 0.08)],
    },
    Card {
        id: "arcane_focus",
        name: "Arcane Focus",
        stars: 3,
        about: "+15% effect hit rate",
        effects: &[(StatKey::EffectHitRate, 0.15)],
    },
    Card {
        id: "steel_skin",
        name: "Steel Skin",
        stars: 3,
        about: "+10% mitigation",
        effects: &[(StatKey::Mitigation, 0.10)],
    },
    Card {
        id: "warlords_banner",
        name: "Warlord's Banner",
        stars: 4,
        about: "+20% ATK and +10% DEF",
        effects: &[(StatKey::Atk, 0.20), (StatKey::Defense, 0.10)],
    },
    Card {
        id: "phoenix_feather",
        name: "Phoenix Feather",
        stars: 4,
        about: "+25% Max HP",
        effects: &[(StatKey::MaxHp, 0.25)],
    },
    Card {
        id: "reality_split",
        name: "Reality Split",
        stars: 5,
        about: "+50% ATK and +50% crit damage",
        effects: &[(StatKey::Atk, 0.50), (StatKey::CritDamage, 0.50)],
    },
];

pub fn card(id: &str) -> Option<&'static Card> {
    CARDS.iter().find(|c| c.id == id)
}

/// Up to three cards of `stars` rank that the party does not own yet.
pub fn card_choices(party: &Party, stars: u8, rng: &mut impl Rng) -> Vec<&'static Card> {
    let mut pool: Vec<&'static Card> = CARDS
        .iter()
        .filter(|c| c.stars == stars && !party.has_card(c.id))
        .collect();
    pool.shuffle(rng);
    pool.truncate(CARD_CHOICE_COUNT);
    pool
}

/// Applies every owned card to each member.
pub fn apply_cards(members: &mut [Stats], cards: &[String]) {
    for id in cards {
        let Some(card) = card(id) else {
            warn!(card = %id, "unknown card ignored");
            continue;
        };
        for member in members.iter_mut() {
            for &(key, fraction) in card.effects {
                if let Err(err) = member.apply_bonus(key, fraction) {
                    warn!(card = card.id, error = %err, "card bonus skipped");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_star_rank_has_cards() {
        for stars in 1..=5 {
            assert!(CARDS.iter().any(|c| c.stars == stars), "no {stars} star card");
        }
    }

    #[test]
    fn test_card_choices_skip_owned() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut party = Party::new(vec![]);
        party.cards = vec!["micro_blade".into(), "sturdy_boots".into()];
        let choices = card_choices(&party, 1, &mut rng);
        assert_eq!(choices.len(), 2);
        assert!(choices.iter().all(|c| c.stars == 1));
        assert!(choices.iter().all(|c| !party.has_card(c.id)));
    }

    #[test]
    fn test_card_choices_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let party = Party::new(vec![]);
        assert_eq!(card_choices(&party, 1, &mut rng).len(), CARD_CHOICE_COUNT);
    }

    #[test]
    fn test_apply_cards() {
        let mut members = vec![Stats::new("a", "A"), Stats::new("b", "B")];
        apply_cards(&mut members, &["keen_edge".to_string(), "unknown".to_string()]);
        for m in &members {
            assert_eq!(m.atk, 108);
        }
    }
}
