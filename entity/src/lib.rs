//! SeaORM entity models for the KaizenHQ schema.
//!
//! Each module mirrors one table created by the `migration` crate.

pub mod prelude;

pub mod energy_usage;
pub mod gym_contribution;
pub mod user;
