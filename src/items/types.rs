use crate::plugins::cards::Card;
use crate::plugins::relics::Relic;
use serde::{Deserialize, Serialize};

/// An elemental upgrade item, or a gacha ticket (0 stars).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeItem {
    pub id: String,
    pub stars: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardChoice {
    pub id: String,
    pub name: String,
    pub stars: u8,
    #[serde(default)]
    pub about: String,
}

impl From<&Card> for CardChoice {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.to_string(),
            name: card.name.to_string(),
            stars: card.stars,
            about: card.about.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicChoice {
    pub id: String,
    pub name: String,
    pub stars: u8,
}

impl From<&Relic> for RelicChoice {
    fn from(relic: &Relic) -> Self {
        Self {
            id: relic.id.to_string(),
            name: relic.name.to_string(),
            stars: relic.stars,
        }
    }
}

/// Everything a won battle offers the party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    /// Gold gained during the battle.
    pub gold: u64,
    #[serde(default)]
    pub card_choices: Vec<CardChoice>,
    #[serde(default)]
    pub relic_choices: Vec<RelicChoice>,
    #[serde(default)]
    pub items: Vec<UpgradeItem>,
}

impl Loot {
    pub fn is_empty(&self) -> bool {
        self.gold == 0
            && self.card_choices.is_empty()
            && self.relic_choices.is_empty()
            && self.items.is_empty()
    }
}
