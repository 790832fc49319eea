//! Encounter resolution: effects, targeting, enrage and the turn loop.

#![allow(unused_imports)]

pub mod config;
pub mod effects;
pub mod engine;
pub mod enrage;
pub mod fighter;
pub mod progress;
pub mod snapshot;
pub mod targeting;
pub mod triggers;

pub use config::*;
pub use effects::*;
pub use engine::*;
pub use enrage::*;
pub use fighter::*;
pub use progress::*;
pub use snapshot::*;
pub use targeting::*;
pub use triggers::*;
