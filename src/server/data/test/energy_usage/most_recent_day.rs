use super::*;

/// Tests looking up the latest day for a player with no rows.
///
/// Verifies that absence of data is reported as None rather than an error.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EnergyUsage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EnergyUsageRepository::new(db);
    let latest = repo.most_recent_day(42).await?;

    assert!(latest.is_none());

    Ok(())
}

/// Tests that the latest day is returned regardless of insertion order.
///
/// Expected: Ok(Some) with the greatest stored date
#[tokio::test]
async fn returns_latest_day() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EnergyUsage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_energy_usage(db, 42, day(2024, 1, 9)).await?;
    factory::create_energy_usage(db, 42, day(2024, 1, 12)).await?;
    factory::create_energy_usage(db, 42, day(2024, 1, 10)).await?;

    let repo = EnergyUsageRepository::new(db);
    let latest = repo.most_recent_day(42).await?;

    assert_eq!(latest, Some(day(2024, 1, 12)));

    Ok(())
}

/// Tests that other players' rows do not affect the result.
///
/// Expected: Ok(Some) with the latest day of the requested player only
#[tokio::test]
async fn ignores_other_players() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EnergyUsage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_energy_usage(db, 42, day(2024, 1, 5)).await?;
    factory::create_energy_usage(db, 99, day(2024, 2, 1)).await?;

    let repo = EnergyUsageRepository::new(db);

    assert_eq!(repo.most_recent_day(42).await?, Some(day(2024, 1, 5)));
    assert_eq!(repo.most_recent_day(7).await?, None);

    Ok(())
}
