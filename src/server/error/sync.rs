use chrono::NaiveDate;
use thiserror::Error;

use crate::server::error::torn::TornApiError;

/// Reason a single account's sync stopped early.
///
/// Captured per account in the run summary; never propagated out of a sync run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Looking up the most recent recorded day failed.
    #[error("Failed to get last recorded day: {0}")]
    LastRecord(#[source] sea_orm::DbErr),

    /// No record exists and the signup time could not be fetched.
    #[error("Failed to get signup time: {0}")]
    Signup(#[source] TornApiError),

    /// Fetching a day's energy usage failed after retries.
    #[error("Failed to get energy for {day}: {source}")]
    Fetch {
        /// Day being fetched
        day: NaiveDate,
        /// The client error from the final attempt
        #[source]
        source: TornApiError,
    },

    /// Writing a day's energy usage to the ledger failed.
    #[error("Failed to store energy for {day}: {source}")]
    Store {
        /// Day being stored
        day: NaiveDate,
        /// The database error
        #[source]
        source: sea_orm::DbErr,
    },
}

impl SyncError {
    /// The day the failure happened on, when the failure is tied to one.
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            Self::Fetch { day, .. } | Self::Store { day, .. } => Some(*day),
            Self::LastRecord(_) | Self::Signup(_) => None,
        }
    }
}
