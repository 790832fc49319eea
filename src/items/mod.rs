//! Battle rewards: loot records and the drop tables that fill them.

pub mod drops;
pub mod types;

pub use drops::*;
pub use types::*;
