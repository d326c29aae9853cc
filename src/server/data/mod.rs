//! Database repository layer.
//!
//! Repositories wrap a borrowed `DatabaseConnection`, use SeaORM entity models internally
//! and return domain models from `server::model`. Every method returns `sea_orm::DbErr`
//! on failure; services decide how a failure affects the sync run.

pub mod energy_usage;
pub mod gym_contribution;
pub mod user;
