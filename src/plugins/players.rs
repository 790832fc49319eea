//! Playable characters.

use crate::character::Stats;
use crate::error::{AutofighterError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub damage_type: &'static str,
    pub max_hp: u32,
    pub atk: u32,
    pub defense: u32,
    pub mitigation: f64,
}

impl PlayerTemplate {
    pub fn stats(&self) -> Stats {
        Stats {
            hp: self.max_hp,
            max_hp: self.max_hp,
            atk: self.atk,
            defense: self.defense,
            mitigation: self.mitigation,
            ..Stats::new(self.id, self.name).with_damage_type(self.damage_type)
        }
    }
}

pub const PLAYERS: [PlayerTemplate; 5] = [
    PlayerTemplate {
        id: "player",
        name: "Player",
        damage_type: "Generic",
        max_hp: 1000,
        atk: 100,
        defense: 50,
        mitigation: 1.0,
    },
    PlayerTemplate {
        id: "ally",
        name: "Ally",
        damage_type: "Light",
        max_hp: 900,
        atk: 80,
        defense: 60,
        mitigation: 1.1,
    },
    PlayerTemplate {
        id: "lady_of_fire",
        name: "LadyOfFire",
        damage_type: "Fire",
        max_hp: 850,
        atk: 130,
        defense: 40,
        mitigation: 1.0,
    },
    PlayerTemplate {
        id: "luna",
        name: "Luna",
        damage_type: "Generic",
        max_hp: 1100,
        atk: 90,
        defense: 70,
        mitigation: 1.2,
    },
    PlayerTemplate {
        id: "mimic",
        name: "Mimic",
        damage_type: "Wind",
        max_hp: 950,
        atk: 95,
        defense: 55,
        mitigation: 1.0,
    },
];

pub fn player_template(id: &str) -> Result<&'static PlayerTemplate> {
    PLAYERS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AutofighterError::UnknownPlayer(id.to_string()))
}

pub fn player_stats(id: &str) -> Result<Stats> {
    player_template(id).map(PlayerTemplate::stats)
}
