use super::effects::EffectManager;
use crate::character::Stats;
use serde::{Deserialize, Serialize};

/// A combatant inside an encounter: a transient copy of its stats plus its
/// own effect manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub stats: Stats,
    pub effects: EffectManager,
}

impl Fighter {
    pub fn new(stats: Stats) -> Self {
        Self {
            stats,
            effects: EffectManager::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }
}

impl From<Stats> for Fighter {
    fn from(stats: Stats) -> Self {
        Self::new(stats)
    }
}
