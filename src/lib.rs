//! Autofighter - turn-based autobattler combat engine.
//!
//! A party of player-controlled fighters meets one foe per battle room. The
//! foe is scaled to the room's position on the map, the encounter runs
//! turn by turn until one side falls, and victories roll rewards.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod error;
pub mod items;
pub mod plugins;
pub mod rooms;
pub mod simulator;
pub mod web;

pub use error::{AutofighterError, Result};
