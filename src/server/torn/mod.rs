//! Torn API client.
//!
//! `TornApi` is the seam the sync services depend on; `TornClient` is the reqwest-backed
//! implementation used in production. The client issues exactly one request per call and
//! never retries on its own. Callers wrap calls in a `RetryPolicy` when a failure should
//! be retried.

pub mod client;
pub mod model;
pub mod retry;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::server::{error::torn::TornApiError, torn::model::GymStat};

pub use client::TornClient;
pub use retry::RetryPolicy;

/// Operations the sync pipeline needs from the Torn API.
///
/// Every method authenticates with the API key of the account being synced, so a single
/// client instance serves all accounts.
#[async_trait]
pub trait TornApi: Send + Sync {
    /// Sums `energy_used` across the gym log entries in `[from, to]` (Unix seconds).
    ///
    /// # Returns
    /// - `Ok(f64)` - Total energy used; `0.0` when the log is empty
    /// - `Err(TornApiError)` - Request, status, decode or Torn API error
    async fn fetch_energy_used(&self, api_key: &str, from: i64, to: i64)
        -> Result<f64, TornApiError>;

    /// Fetches the account's signup time from its profile.
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - Signup instant
    /// - `Err(TornApiError::InvalidSignup)` - Profile `signup` not in `YYYY-MM-DD HH:MM:SS` form
    /// - `Err(TornApiError)` - Request, status, decode or Torn API error
    async fn fetch_signup(&self, api_key: &str) -> Result<DateTime<Utc>, TornApiError>;

    /// Fetches the faction's contributed energy per member for one gym stat.
    ///
    /// Requires a key with faction API access.
    ///
    /// # Returns
    /// - `Ok(HashMap<i64, i64>)` - Contributed energy keyed by Torn player ID
    /// - `Err(TornApiError)` - Request, status, decode or Torn API error
    async fn fetch_gym_contributors(
        &self,
        api_key: &str,
        stat: GymStat,
    ) -> Result<HashMap<i64, i64>, TornApiError>;
}
