use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    Start,
    BattleNormal,
    BattleBoss,
    BattleBossFloor,
    Shop,
    Rest,
    Chat,
}

/// A position on the run map. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    pub floor: u32,
    pub index: u32,
    #[serde(rename = "loop")]
    pub loop_count: u32,
    pub pressure: u32,
    pub room_type: RoomType,
}

impl Default for MapNode {
    fn default() -> Self {
        Self {
            floor: 1,
            index: 1,
            loop_count: 1,
            pressure: 0,
            room_type: RoomType::BattleNormal,
        }
    }
}

impl MapNode {
    pub fn new(floor: u32, index: u32, loop_count: u32, pressure: u32) -> Self {
        Self {
            floor,
            index,
            loop_count,
            pressure,
            room_type: RoomType::BattleNormal,
        }
    }

    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }
}

/// Difficulty band of a battle room, used by the reward tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomTier {
    Normal,
    /// Non-boss room with strength above 1.0.
    Elevated,
    Boss,
    FloorBoss,
}

impl RoomTier {
    pub fn is_boss(&self) -> bool {
        matches!(self, RoomTier::Boss | RoomTier::FloorBoss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_json_shape() {
        let node = MapNode::new(2, 5, 1, 3).with_room_type(RoomType::BattleBossFloor);
        let json = serde_json::to_value(node).unwrap();
        assert_eq!(json["loop"], 1);
        assert_eq!(json["room_type"], "battle-boss-floor");
        let back: MapNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_tier_boss_flag() {
        assert!(RoomTier::FloorBoss.is_boss());
        assert!(RoomTier::Boss.is_boss());
        assert!(!RoomTier::Elevated.is_boss());
    }
}
