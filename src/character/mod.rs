//! Combatant stats and the persistent party.

#![allow(unused_imports)]

pub mod party;
pub mod stats;

pub use party::*;
pub use stats::*;
