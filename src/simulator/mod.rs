//! Monte Carlo battle simulator.
//!
//! Resolves many seeded encounters against the same map node and
//! aggregates the outcomes, for tuning scaling and reward tables. Every run
//! goes through [`BattleRoom::resolve`](crate::rooms::BattleRoom::resolve),
//! so results match real encounters.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
