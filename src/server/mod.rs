//! Energy usage sync backend.
//!
//! Keeps a per-player daily ledger of gym energy usage filled from the Torn API. A daily
//! scheduler walks every registered account, fetches each missing UTC day's gym log and
//! stores the day's total, then optionally snapshots faction gym contributions.
//!
//! # Architecture
//!
//! - **Scheduler** (`scheduler/`) - Daily tick on a supervised tokio task with cooperative shutdown
//! - **Service Layer** (`service/`) - Sync orchestration across accounts and days
//! - **Torn Client** (`torn/`) - `TornApi` trait, reqwest implementation, wire types and retry policy
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Startup** (`startup`) - Tracing, database connection and migrations, Torn client
//! - **Util** (`util/`) - Shutdown signal shared by the scheduler and services
//!
//! # Run Flow
//!
//! 1. **Scheduler** wakes at the configured UTC time and calls the sync job
//! 2. **Service** lists tracked accounts and resolves each account's missing days
//! 3. **Torn Client** fetches one day of gym log per request, retrying transient failures
//! 4. **Data** upserts the day's total into the ledger
//! 5. **Scheduler** logs the run summary and sleeps until the next day

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod torn;
pub mod util;
