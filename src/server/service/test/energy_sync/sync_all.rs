use super::*;

/// Tests a run with no tracked accounts.
///
/// Expected: Ok with an empty summary and no Torn API calls
#[tokio::test]
async fn empty_directory_returns_empty_summary() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let api = FakeTornApi::new();
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();

    let summary = EnergySyncService::new(db, &api)
        .sync_all(now, &Shutdown::never())
        .await
        .unwrap();

    assert_eq!(summary.attempted, 0);
    assert_eq!(summary.days_stored, 0);
    assert!(api.fetches().is_empty());

    Ok(())
}

/// Tests that one failing account does not stop the others.
///
/// Verifies that account A keeps the days it stored before failing, and account B is
/// still brought fully up to date.
///
/// Expected: Ok with one success and one failure naming A and the failing day
#[tokio::test]
async fn failing_account_does_not_stop_others() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    tracked_account(db, 1, "key-a").await?;
    tracked_account(db, 2, "key-b").await?;
    factory::create_energy_usage(db, 1, day(2024, 1, 10)).await?;
    factory::create_energy_usage(db, 2, day(2024, 1, 10)).await?;

    let api = FakeTornApi::new()
        .with_energy("key-a", day(2024, 1, 11), 10.0)
        .failing_on("key-a", day(2024, 1, 12))
        .with_energy("key-b", day(2024, 1, 11), 20.0)
        .with_energy("key-b", day(2024, 1, 12), 30.0);
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();

    let summary = EnergySyncService::new(db, &api)
        .sync_all(now, &Shutdown::never())
        .await
        .unwrap();

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.days_stored, 3);
    assert_eq!(summary.failures[0].torn_id, 1);
    assert_eq!(summary.failures[0].day, Some(day(2024, 1, 12)));

    assert_eq!(
        EnergyUsageRepository::new(db).most_recent_day(1).await?,
        Some(day(2024, 1, 11))
    );
    assert_eq!(
        stored_days(db, 2).await?,
        vec![
            (day(2024, 1, 10), 0.0),
            (day(2024, 1, 11), 20.0),
            (day(2024, 1, 12), 30.0)
        ]
    );

    Ok(())
}

/// Tests that accounts without an API key are not attempted.
///
/// Expected: Ok with only the keyed account attempted
#[tokio::test]
async fn skips_accounts_without_api_key() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    tracked_account(db, 1, "key-a").await?;
    tracked_account(db, 2, "").await?;
    factory::create_energy_usage(db, 1, day(2024, 1, 12)).await?;

    let api = FakeTornApi::new();
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();

    let summary = EnergySyncService::new(db, &api)
        .sync_all(now, &Shutdown::never())
        .await
        .unwrap();

    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(api.signup_calls(), 0);

    Ok(())
}

/// Tests concurrent account syncs.
///
/// Verifies that with several accounts in flight each account's days are still fetched
/// in order and every account completes.
///
/// Expected: Ok with all accounts succeeded and per-account fetches ascending
#[tokio::test]
async fn concurrent_accounts_keep_day_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for torn_id in 1..=3 {
        tracked_account(db, torn_id, &format!("key-{}", torn_id)).await?;
        factory::create_energy_usage(db, torn_id, day(2024, 1, 8)).await?;
    }

    let api = FakeTornApi::new();
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();

    let summary = EnergySyncService::new(db, &api)
        .with_max_concurrency(3)
        .sync_all(now, &Shutdown::never())
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.days_stored, 12);
    for torn_id in 1..=3 {
        let froms: Vec<i64> = api
            .fetches_for(&format!("key-{}", torn_id))
            .into_iter()
            .map(|(from, _)| from)
            .collect();
        let mut sorted = froms.clone();
        sorted.sort();
        assert_eq!(froms.len(), 4);
        assert_eq!(froms, sorted);
    }

    Ok(())
}

/// Tests a second run immediately after a successful one.
///
/// Expected: Ok with zero days stored and no further fetches
#[tokio::test]
async fn second_run_is_a_no_op() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sync_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    tracked_account(db, 1, "key-a").await?;
    let api = FakeTornApi::new()
        .with_signup("key-a", Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
    let now = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();
    let service = EnergySyncService::new(db, &api);

    let first = service.sync_all(now, &Shutdown::never()).await.unwrap();
    let fetches_after_first = api.fetches().len();
    let second = service.sync_all(now, &Shutdown::never()).await.unwrap();

    assert_eq!(first.days_stored, 3);
    assert_eq!(second.days_stored, 0);
    assert_eq!(api.fetches().len(), fetches_after_first);

    Ok(())
}
