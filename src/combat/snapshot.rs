use super::enrage::EnrageState;
use crate::character::Stats;
use serde::{Deserialize, Serialize};

/// Encounter outcome tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Battle,
    Boss,
    Defeat,
}

impl Outcome {
    pub fn is_victory(&self) -> bool {
        !matches!(self, Outcome::Defeat)
    }
}

/// Mid-battle state handed to a progress sink after every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub result: Outcome,
    pub party: Vec<Stats>,
    pub foes: Vec<Stats>,
    pub enrage: EnrageState,
    pub rdr: f64,
    #[serde(default)]
    pub turn: u32,
}
