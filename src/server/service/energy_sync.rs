use chrono::{DateTime, NaiveDate, Utc};
use futures::{stream, StreamExt};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{energy_usage::EnergyUsageRepository, user::UserRepository},
    error::{sync::SyncError, AppError},
    model::{
        energy_usage::UpsertEnergyUsageParam,
        sync::{AccountSyncResult, SyncOutcome, SyncSummary, SyncWindow},
        user::TrackedAccount,
    },
    torn::{RetryPolicy, TornApi},
    util::shutdown::Shutdown,
};

/// Fills each tracked account's energy usage ledger up to yesterday.
///
/// For every account the service resumes from the day after its last stored record (or
/// from its signup day when nothing is stored yet) and fetches one full UTC day at a time,
/// oldest first. The current day is never fetched since it is still in progress.
pub struct EnergySyncService<'a> {
    db: &'a DatabaseConnection,
    api: &'a dyn TornApi,
    retry: RetryPolicy,
    max_concurrency: usize,
}

impl<'a> EnergySyncService<'a> {
    /// Creates a new EnergySyncService with the default retry policy, syncing one account
    /// at a time.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `api` - Torn API implementation to fetch logs and profiles through
    pub fn new(db: &'a DatabaseConnection, api: &'a dyn TornApi) -> Self {
        Self {
            db,
            api,
            retry: RetryPolicy::default(),
            max_concurrency: 1,
        }
    }

    /// Replaces the retry policy applied to each Torn API call.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets how many accounts may be synced concurrently. Values below 1 are treated as 1.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Syncs every tracked account.
    ///
    /// A failure in one account is recorded in the summary and never stops the others.
    /// Each account's days are always processed in order, even when several accounts run
    /// concurrently.
    ///
    /// # Arguments
    /// - `now` - Invocation instant; days up to the one before it are filled
    /// - `shutdown` - Checked before each day; a set signal cancels remaining work
    ///
    /// # Returns
    /// - `Ok(SyncSummary)` - Per-run totals and the failed accounts
    /// - `Err(AppError::DbErr)` - Tracked accounts could not be listed
    pub async fn sync_all(
        &self,
        now: DateTime<Utc>,
        shutdown: &Shutdown,
    ) -> Result<SyncSummary, AppError> {
        let accounts = UserRepository::new(self.db).list_tracked_accounts().await?;

        if accounts.is_empty() {
            tracing::info!("No tracked accounts to sync");
            return Ok(SyncSummary::default());
        }

        tracing::info!(
            "Syncing energy usage for {} accounts ({} at a time)",
            accounts.len(),
            self.max_concurrency
        );

        let results: Vec<AccountSyncResult> = stream::iter(accounts)
            .map(|account| async move { self.sync_account(&account, now, shutdown).await })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let mut summary = SyncSummary::from_results(results);
        summary.failures.sort_by_key(|failure| failure.torn_id);

        Ok(summary)
    }

    /// Syncs a single account up to the day before `now`.
    ///
    /// Days stored before a failure or cancellation stay committed, so the next run
    /// resumes from where this one stopped.
    ///
    /// # Arguments
    /// - `account` - Account to sync, authenticating with its own API key
    /// - `now` - Invocation instant
    /// - `shutdown` - Checked before each day
    ///
    /// # Returns
    /// - `AccountSyncResult` - Outcome with the number of days stored
    pub async fn sync_account(
        &self,
        account: &TrackedAccount,
        now: DateTime<Utc>,
        shutdown: &Shutdown,
    ) -> AccountSyncResult {
        let outcome = self.fill_missing_days(account, now, shutdown).await;

        match &outcome {
            SyncOutcome::Completed { days } => {
                tracing::info!("Synced {} days for account {}", days, account.torn_id);
            }
            SyncOutcome::Cancelled { days } => {
                tracing::warn!(
                    "Sync for account {} cancelled after {} days",
                    account.torn_id,
                    days
                );
            }
            SyncOutcome::Failed { days, error } => {
                tracing::error!(
                    "Sync for account {} failed after {} days: {}",
                    account.torn_id,
                    days,
                    error
                );
            }
        }

        AccountSyncResult {
            torn_id: account.torn_id,
            outcome,
        }
    }

    async fn fill_missing_days(
        &self,
        account: &TrackedAccount,
        now: DateTime<Utc>,
        shutdown: &Shutdown,
    ) -> SyncOutcome {
        let start = match self.first_missing_day(account).await {
            Ok(start) => start,
            Err(error) => return SyncOutcome::Failed { days: 0, error },
        };

        let Some(window) = start.and_then(|start| SyncWindow::resolve(start, now)) else {
            tracing::debug!("Account {} is already up to date", account.torn_id);
            return SyncOutcome::Completed { days: 0 };
        };

        tracing::debug!(
            "Filling {} days for account {} ({} to {})",
            window.day_count(),
            account.torn_id,
            window.start,
            window.end
        );

        let repo = EnergyUsageRepository::new(self.db);
        let api = self.api;
        let api_key = account.api_key.as_str();
        let mut days = 0;

        for day in window.days() {
            if shutdown.is_triggered() {
                return SyncOutcome::Cancelled { days };
            }

            let (from, to) = window.day_bounds(day);

            let energy = match self
                .retry
                .run("Energy log fetch", || api.fetch_energy_used(api_key, from, to))
                .await
            {
                Ok(energy) => energy,
                Err(source) => {
                    return SyncOutcome::Failed {
                        days,
                        error: SyncError::Fetch { day, source },
                    }
                }
            };

            if let Err(source) = repo
                .upsert_day(UpsertEnergyUsageParam {
                    torn_id: account.torn_id,
                    date: day,
                    energy,
                })
                .await
            {
                return SyncOutcome::Failed {
                    days,
                    error: SyncError::Store { day, source },
                };
            }

            tracing::debug!(
                "Stored {} energy for account {} on {}",
                energy,
                account.torn_id,
                day
            );

            days += 1;
        }

        SyncOutcome::Completed { days }
    }

    /// Day after the last stored record, or the signup day when nothing is stored.
    ///
    /// `Ok(None)` only when the last record is the final representable date.
    async fn first_missing_day(
        &self,
        account: &TrackedAccount,
    ) -> Result<Option<NaiveDate>, SyncError> {
        let last = EnergyUsageRepository::new(self.db)
            .most_recent_day(account.torn_id)
            .await
            .map_err(SyncError::LastRecord)?;

        if let Some(last) = last {
            return Ok(SyncWindow::day_after(last));
        }

        let api = self.api;
        let api_key = account.api_key.as_str();

        let signup = self
            .retry
            .run("Profile fetch", || api.fetch_signup(api_key))
            .await
            .map_err(SyncError::Signup)?;

        tracing::debug!(
            "No energy usage stored for account {}, starting from signup {}",
            account.torn_id,
            signup
        );

        Ok(Some(signup.date_naive()))
    }
}
