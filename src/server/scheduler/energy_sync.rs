use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    error::AppError,
    model::sync::SyncSummary,
    scheduler::daily::{DailyScheduler, SchedulerHandle},
    service::{energy_sync::EnergySyncService, gym_contribution::GymContributionService},
    torn::TornApi,
    util::shutdown::Shutdown,
};

/// Starts the daily energy sync scheduler.
///
/// Each run fills every tracked account's ledger up to yesterday and, when a faction API
/// key is configured, records the day's faction gym contribution snapshot.
///
/// # Arguments
/// - `db` - Database connection
/// - `api` - Torn API implementation shared by every run
/// - `config` - Sync time, startup run, concurrency and faction key
///
/// # Returns
/// - `SchedulerHandle` - Handle to stop the scheduler on shutdown
pub fn start_scheduler(
    db: DatabaseConnection,
    api: Arc<dyn TornApi>,
    config: &Config,
) -> SchedulerHandle {
    let concurrency = config.energy_sync_concurrency;
    let faction_api_key = config.torn_faction_api_key.clone();

    if faction_api_key.is_none() {
        tracing::info!("TORN_FACTION_API_KEY not set, gym contribution snapshot disabled");
    }

    let handle = DailyScheduler::new("energy sync", config.energy_sync_time)
        .run_on_startup(config.energy_sync_on_startup)
        .start(move |now, shutdown| {
            let db = db.clone();
            let api = api.clone();
            let faction_api_key = faction_api_key.clone();

            async move {
                run_daily_sync(
                    &db,
                    api.as_ref(),
                    concurrency,
                    faction_api_key.as_deref(),
                    now,
                    &shutdown,
                )
                .await
            }
        });

    tracing::info!(
        "Energy sync scheduler started (daily at {} UTC)",
        config.energy_sync_time.format("%H:%M")
    );

    handle
}

/// Runs one daily tick: the energy sync followed by the optional gym snapshot.
///
/// A failed gym snapshot is logged and does not fail the run.
///
/// # Returns
/// - `Ok(())` - Run finished; per-account failures are logged from the summary
/// - `Err(AppError)` - Tracked accounts could not be listed
async fn run_daily_sync(
    db: &DatabaseConnection,
    api: &dyn TornApi,
    concurrency: usize,
    faction_api_key: Option<&str>,
    now: DateTime<Utc>,
    shutdown: &Shutdown,
) -> Result<(), AppError> {
    let summary = EnergySyncService::new(db, api)
        .with_max_concurrency(concurrency)
        .sync_all(now, shutdown)
        .await?;

    log_summary(&summary);

    if let Some(api_key) = faction_api_key {
        if shutdown.is_triggered() {
            return Ok(());
        }

        if let Err(e) = GymContributionService::new(db, api)
            .update_gym_contributions(api_key, now.date_naive())
            .await
        {
            tracing::error!("Failed to update gym contributions: {}", e);
        }
    }

    Ok(())
}

fn log_summary(summary: &SyncSummary) {
    tracing::info!(
        "Energy sync finished: {} accounts, {} succeeded, {} failed, {} cancelled, {} days stored",
        summary.attempted,
        summary.succeeded,
        summary.failed(),
        summary.cancelled,
        summary.days_stored
    );

    for failure in &summary.failures {
        match failure.day {
            Some(day) => tracing::warn!(
                "Account {} failed on {}: {}",
                failure.torn_id,
                day,
                failure.reason
            ),
            None => tracing::warn!("Account {} failed: {}", failure.torn_id, failure.reason),
        }
    }
}
