//! Built-in content: damage types, rosters, cards and relics.

pub mod cards;
pub mod damage_types;
pub mod foes;
pub mod players;
pub mod relics;
