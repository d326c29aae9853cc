//! Service layer for the sync pipeline.
//!
//! Services sit between the scheduler and the data layer. They combine repository calls
//! with Torn API calls (through the `TornApi` trait, each wrapped in a `RetryPolicy`) and
//! return `AppError` for failures the caller has to act on.

pub mod energy_sync;
pub mod gym_contribution;

#[cfg(test)]
pub(crate) mod test;
