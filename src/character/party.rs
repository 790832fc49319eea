use super::stats::Stats;
use serde::{Deserialize, Serialize};

/// The player's persistent party, carried between rooms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub members: Vec<Stats>,
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub relics: Vec<String>,
    #[serde(default)]
    pub cards: Vec<String>,
    /// Rare drop rate. Boosts relic odds, star upgrades, gold and tickets.
    #[serde(default = "default_rdr")]
    pub rdr: f64,
    /// Portion of `rdr` contributed by held relics.
    #[serde(default)]
    pub relic_rdr: f64,
}

fn default_rdr() -> f64 {
    1.0
}

impl Party {
    pub fn new(members: Vec<Stats>) -> Self {
        Self {
            members,
            rdr: default_rdr(),
            ..Default::default()
        }
    }

    pub fn member(&self, id: &str) -> Option<&Stats> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn member_mut(&mut self, id: &str) -> Option<&mut Stats> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Stats> {
        self.members.iter().filter(|m| m.is_alive())
    }

    pub fn is_defeated(&self) -> bool {
        self.members.iter().all(|m| !m.is_alive())
    }

    /// Count of a relic in the party's collection. Relics stack.
    pub fn relic_stacks(&self, relic_id: &str) -> usize {
        self.relics.iter().filter(|r| r.as_str() == relic_id).count()
    }

    pub fn has_card(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c == card_id)
    }
}
