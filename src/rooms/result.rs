use crate::character::{Party, Stats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Shop,
    Rest,
    Chat,
}

/// Outcome of a non-combat room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResult {
    pub result: RoomKind,
    pub party: Vec<Stats>,
    pub gold: u64,
    pub relics: Vec<String>,
    pub cards: Vec<String>,
    pub rdr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RoomResult {
    pub fn snapshot(kind: RoomKind, party: &Party) -> Self {
        Self {
            result: kind,
            party: party.members.clone(),
            gold: party.gold,
            relics: party.relics.clone(),
            cards: party.cards.clone(),
            rdr: party.rdr,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
