//! Ephemeral models for a sync run.
//!
//! A run computes one `SyncWindow` per account, produces one `AccountSyncResult` per
//! account, and folds those into a `SyncSummary` for logging. None of these are persisted.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::server::error::sync::SyncError;

/// Seconds from 00:00:00 to 23:59:59.
const LAST_SECOND_OF_DAY: i64 = 86_399;

/// Inclusive range of UTC calendar days still missing from the ledger.
///
/// `end` is always the day before the invocation instant, so the current partial day is
/// never fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindow {
    /// First missing day.
    pub start: NaiveDate,
    /// Yesterday relative to the invocation instant.
    pub end: NaiveDate,
}

impl SyncWindow {
    /// Resolves the window from the first missing day and the invocation instant.
    ///
    /// # Arguments
    /// - `start` - First day to fill (day after the last record, or the signup day)
    /// - `now` - Invocation instant
    ///
    /// # Returns
    /// - `Some(SyncWindow)` - At least one day needs filling
    /// - `None` - `start` is after yesterday; nothing to do
    pub fn resolve(start: NaiveDate, now: DateTime<Utc>) -> Option<Self> {
        let end = now.date_naive().pred_opt()?;

        if start > end {
            return None;
        }

        Some(Self { start, end })
    }

    /// First day to fill given the last recorded day, or `None` at the end of the calendar.
    pub fn day_after(last_recorded: NaiveDate) -> Option<NaiveDate> {
        last_recorded.succ_opt()
    }

    /// Days in the window, oldest first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Number of days in the window.
    pub fn day_count(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    /// Unix timestamp of 23:59:59 UTC on `end`.
    pub fn yesterday_end(&self) -> i64 {
        day_start(self.end) + LAST_SECOND_OF_DAY
    }

    /// Unix `[from, to]` bounds for one day, `to` clamped so it never passes `end`.
    pub fn day_bounds(&self, day: NaiveDate) -> (i64, i64) {
        let from = day_start(day);
        let to = (from + LAST_SECOND_OF_DAY).min(self.yesterday_end());
        (from, to)
    }
}

/// Unix timestamp of 00:00:00 UTC on `day`.
fn day_start(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// How one account's run ended.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Every missing day was stored (possibly none).
    Completed {
        /// Days stored in this run.
        days: u32,
    },
    /// Shutdown was requested between two days.
    Cancelled {
        /// Days stored before stopping.
        days: u32,
    },
    /// A fetch or store failed; later days were not attempted.
    Failed {
        /// Days stored before the failure; they stay committed.
        days: u32,
        /// What went wrong.
        error: SyncError,
    },
}

impl SyncOutcome {
    /// Days stored in this run regardless of how it ended.
    pub fn days_stored(&self) -> u32 {
        match self {
            Self::Completed { days } | Self::Cancelled { days } | Self::Failed { days, .. } => {
                *days
            }
        }
    }
}

/// Result of syncing one tracked account.
#[derive(Debug)]
pub struct AccountSyncResult {
    /// Torn player ID of the account.
    pub torn_id: i64,
    /// How the run ended.
    pub outcome: SyncOutcome,
}

/// An account whose run failed, as reported in the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountFailure {
    /// Torn player ID of the account.
    pub torn_id: i64,
    /// Day the failure happened on, when tied to one.
    pub day: Option<NaiveDate>,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Aggregate result of one sync run across all tracked accounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncSummary {
    /// Accounts the run attempted.
    pub attempted: usize,
    /// Accounts brought fully up to date.
    pub succeeded: usize,
    /// Accounts stopped by shutdown.
    pub cancelled: usize,
    /// Days stored across all accounts.
    pub days_stored: u64,
    /// Accounts that failed, with reasons.
    pub failures: Vec<AccountFailure>,
}

impl SyncSummary {
    /// Folds per-account results into a summary.
    pub fn from_results(results: Vec<AccountSyncResult>) -> Self {
        let mut summary = Self {
            attempted: results.len(),
            ..Default::default()
        };

        for result in results {
            summary.days_stored += u64::from(result.outcome.days_stored());

            match result.outcome {
                SyncOutcome::Completed { .. } => summary.succeeded += 1,
                SyncOutcome::Cancelled { .. } => summary.cancelled += 1,
                SyncOutcome::Failed { error, .. } => summary.failures.push(AccountFailure {
                    torn_id: result.torn_id,
                    day: error.day(),
                    reason: error.to_string(),
                }),
            }
        }

        summary
    }

    /// Number of accounts that failed.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
