//! Background scheduling.
//!
//! `DailyScheduler` drives a job once per day at a fixed UTC wall-clock time on a single
//! supervised tokio task. `energy_sync` wires the energy usage sync (and the faction gym
//! snapshot) into it from configuration.

pub mod clock;
pub mod daily;
pub mod energy_sync;
