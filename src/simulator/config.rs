//! Simulation configuration.

use crate::error::{AutofighterError, Result};
use crate::plugins::players::player_template;
use crate::rooms::{BattleRoom, MapNode, RoomType};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of encounters to resolve
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Node every encounter is fought on; its room type picks the tier
    pub node: MapNode,

    /// Player ids making up the party
    pub party: Vec<String>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            node: MapNode::default(),
            party: vec!["player".to_string()],
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for boss balance
    pub fn boss_check(floor: u32) -> Self {
        Self {
            num_runs: 100,
            node: MapNode::new(floor, 10, 1, 0).with_room_type(RoomType::BattleBoss),
            ..Default::default()
        }
    }

    /// Quick config for floor boss balance at a given loop and pressure
    pub fn floor_boss_check(loop_count: u32, pressure: u32) -> Self {
        Self {
            num_runs: 100,
            node: MapNode::new(1, 10, loop_count, pressure)
                .with_room_type(RoomType::BattleBossFloor),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_runs == 0 {
            return Err(AutofighterError::InvalidConfig(
                "num_runs must be at least 1".into(),
            ));
        }
        if self.node.floor == 0 || self.node.index == 0 {
            return Err(AutofighterError::InvalidConfig(
                "floor and room index start at 1".into(),
            ));
        }
        if self.party.is_empty() {
            return Err(AutofighterError::InvalidConfig("party is empty".into()));
        }
        for id in &self.party {
            player_template(id)?;
        }
        self.room()?;
        Ok(())
    }

    pub fn room(&self) -> Result<BattleRoom> {
        BattleRoom::for_node(self.node).ok_or_else(|| {
            AutofighterError::InvalidConfig(format!(
                "{:?} is not a battle room",
                self.node.room_type
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert!(SimConfig::boss_check(3).validate().is_ok());
        assert!(SimConfig::floor_boss_check(2, 10).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_configs() {
        let zero_runs = SimConfig {
            num_runs: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_runs.validate(),
            Err(AutofighterError::InvalidConfig(_))
        ));

        let shop = SimConfig {
            node: MapNode::default().with_room_type(RoomType::Shop),
            ..Default::default()
        };
        assert!(shop.validate().is_err());

        let stranger = SimConfig {
            party: vec!["nobody".into()],
            ..Default::default()
        };
        assert!(matches!(
            stranger.validate(),
            Err(AutofighterError::UnknownPlayer(_))
        ));
    }
}
