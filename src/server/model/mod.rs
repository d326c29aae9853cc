//! Domain models.
//!
//! Models are converted from SeaORM entities at the repository boundary with
//! `from_entity`, so services never handle entity types directly.

pub mod energy_usage;
pub mod gym_contribution;
pub mod sync;
pub mod user;
