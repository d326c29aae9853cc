use super::*;

/// Tests resuming after the last stored day.
///
/// Verifies that with a record for 2024-01-10 and an invocation at 2024-01-13T00:00Z the
/// service fetches exactly 2024-01-11 and 2024-01-12, each as a full UTC day, and stores
/// both.
///
/// Expected: Completed with 2 days and one fetch per day
#[tokio::test]
async fn fills_days_after_last_record() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    factory::create_energy_usage(db, 42, day(2024, 1, 10)).await?;

    let api = FakeTornApi::new()
        .with_energy("key-42", day(2024, 1, 11), 150.0)
        .with_energy("key-42", day(2024, 1, 12), 75.5);
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();

    let result = EnergySyncService::new(db, &api)
        .sync_account(&account, now, &Shutdown::never())
        .await;

    assert!(matches!(result.outcome, SyncOutcome::Completed { days: 2 }));
    assert_eq!(
        api.fetches_for("key-42"),
        vec![(1704931200, 1705017599), (1705017600, 1705103999)]
    );
    assert_eq!(api.signup_calls(), 0);
    assert_eq!(
        stored_days(db, 42).await?,
        vec![
            (day(2024, 1, 10), 0.0),
            (day(2024, 1, 11), 150.0),
            (day(2024, 1, 12), 75.5)
        ]
    );

    Ok(())
}

/// Tests the first sync of an account with no stored days.
///
/// Verifies that the signup time is fetched and its UTC calendar day is the first day
/// filled.
///
/// Expected: Completed with every day from signup through yesterday
#[tokio::test]
async fn starts_from_signup_day_without_records() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    let api = FakeTornApi::new()
        .with_signup("key-42", Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap());
    let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();

    let result = EnergySyncService::new(db, &api)
        .sync_account(&account, now, &Shutdown::never())
        .await;

    assert!(matches!(result.outcome, SyncOutcome::Completed { days: 3 }));
    assert_eq!(api.signup_calls(), 1);
    let first_from = api.fetches_for("key-42")[0].0;
    assert_eq!(first_from, day_start(day(2024, 1, 5)));
    let dates: Vec<NaiveDate> = stored_days(db, 42).await?.into_iter().map(|(d, _)| d).collect();
    assert_eq!(dates, vec![day(2024, 1, 5), day(2024, 1, 6), day(2024, 1, 7)]);

    Ok(())
}

/// Tests an account that already has yesterday stored.
///
/// Expected: Completed with 0 days and no Torn API calls
#[tokio::test]
async fn up_to_date_account_makes_no_fetches() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    factory::create_energy_usage(db, 42, day(2024, 1, 12)).await?;

    let api = FakeTornApi::new();
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 23, 59, 59).unwrap();

    let result = EnergySyncService::new(db, &api)
        .sync_account(&account, now, &Shutdown::never())
        .await;

    assert!(matches!(result.outcome, SyncOutcome::Completed { days: 0 }));
    assert!(api.fetches().is_empty());
    assert_eq!(api.signup_calls(), 0);

    Ok(())
}

/// Tests an account that signed up today.
///
/// Expected: Completed with 0 days and no log fetches
#[tokio::test]
async fn signup_today_has_nothing_to_fill() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    let api = FakeTornApi::new()
        .with_signup("key-42", Utc.with_ymd_and_hms(2024, 1, 13, 6, 0, 0).unwrap());
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 9, 0, 0).unwrap();

    let result = EnergySyncService::new(db, &api)
        .sync_account(&account, now, &Shutdown::never())
        .await;

    assert!(matches!(result.outcome, SyncOutcome::Completed { days: 0 }));
    assert!(api.fetches().is_empty());

    Ok(())
}

/// Tests a day with no gym log entries.
///
/// Verifies that an empty log is stored as a zero row so the day is not fetched again.
///
/// Expected: Completed with a 0.0 row for the day
#[tokio::test]
async fn stores_zero_for_day_without_training() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    factory::create_energy_usage(db, 42, day(2024, 1, 10)).await?;

    let api = FakeTornApi::new();
    let now = Utc.with_ymd_and_hms(2024, 1, 12, 3, 0, 0).unwrap();

    let result = EnergySyncService::new(db, &api)
        .sync_account(&account, now, &Shutdown::never())
        .await;

    assert!(matches!(result.outcome, SyncOutcome::Completed { days: 1 }));
    assert_eq!(
        stored_days(db, 42).await?.last(),
        Some(&(day(2024, 1, 11), 0.0))
    );

    Ok(())
}

/// Tests a fetch failure partway through the range.
///
/// Verifies that days stored before the failure stay committed and no later day is
/// attempted.
///
/// Expected: Failed on the failing day with earlier days kept
#[tokio::test]
async fn keeps_stored_days_when_fetch_fails() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    factory::create_energy_usage(db, 42, day(2024, 1, 10)).await?;

    let api = FakeTornApi::new()
        .with_energy("key-42", day(2024, 1, 11), 40.0)
        .failing_on("key-42", day(2024, 1, 12));
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

    let result = EnergySyncService::new(db, &api)
        .sync_account(&account, now, &Shutdown::never())
        .await;

    match result.outcome {
        SyncOutcome::Failed {
            days,
            error: SyncError::Fetch { day: failed_day, .. },
        } => {
            assert_eq!(days, 1);
            assert_eq!(failed_day, day(2024, 1, 12));
        }
        other => panic!("expected fetch failure, got {:?}", other),
    }
    assert_eq!(api.fetches_for("key-42").len(), 2);
    assert_eq!(
        EnergyUsageRepository::new(db).most_recent_day(42).await?,
        Some(day(2024, 1, 11))
    );

    Ok(())
}

/// Tests that a transient fetch error is retried rather than failing the account.
///
/// Expected: Completed with the day stored after a second attempt
#[tokio::test]
async fn retries_transient_fetch_errors() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    factory::create_energy_usage(db, 42, day(2024, 1, 10)).await?;

    let api = FakeTornApi::new()
        .with_energy("key-42", day(2024, 1, 11), 25.0)
        .with_transient_failures(1);
    let now = Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap();

    let result = EnergySyncService::new(db, &api)
        .with_retry_policy(instant_retry())
        .sync_account(&account, now, &Shutdown::never())
        .await;

    assert!(matches!(result.outcome, SyncOutcome::Completed { days: 1 }));
    assert_eq!(api.fetches_for("key-42").len(), 2);
    assert_eq!(
        stored_days(db, 42).await?.last(),
        Some(&(day(2024, 1, 11), 25.0))
    );

    Ok(())
}

/// Tests an account whose signup time cannot be fetched.
///
/// Expected: Failed with a signup error, no day attached and nothing stored
#[tokio::test]
async fn signup_failure_fails_account() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    let api = FakeTornApi::new();
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();

    let result = EnergySyncService::new(db, &api)
        .sync_account(&account, now, &Shutdown::never())
        .await;

    match result.outcome {
        SyncOutcome::Failed { days, error } => {
            assert_eq!(days, 0);
            assert!(matches!(error, SyncError::Signup(_)));
            assert_eq!(error.day(), None);
        }
        other => panic!("expected signup failure, got {:?}", other),
    }
    assert!(api.fetches().is_empty());

    Ok(())
}

/// Tests shutdown requested while a range is being filled.
///
/// Verifies that the day in progress is finished and stored, and no further day starts.
///
/// Expected: Cancelled with the days stored before the signal was seen
#[tokio::test]
async fn stops_between_days_on_shutdown() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let account = tracked_account(db, 42, "key-42").await?;
    factory::create_energy_usage(db, 42, day(2024, 1, 10)).await?;

    let (tx, shutdown) = Shutdown::channel();
    let api = FakeTornApi::new().trigger_shutdown_after(2, tx);
    let now = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();

    let result = EnergySyncService::new(db, &api)
        .sync_account(&account, now, &shutdown)
        .await;

    assert!(matches!(result.outcome, SyncOutcome::Cancelled { days: 2 }));
    assert_eq!(api.fetches().len(), 2);
    assert_eq!(
        EnergyUsageRepository::new(db).most_recent_day(42).await?,
        Some(day(2024, 1, 12))
    );

    Ok(())
}
