use super::*;

/// Tests reading an inclusive range.
///
/// Verifies that rows on both boundaries are included, rows outside are excluded, and
/// results are ordered oldest first.
///
/// Expected: Ok with boundary rows included in ascending date order
#[tokio::test]
async fn returns_inclusive_range_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EnergyUsage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (d, energy) in [(12, 30.0), (9, 5.0), (10, 10.0), (13, 40.0), (11, 20.0)] {
        factory::energy_usage::EnergyUsageFactory::new(db, 42, day(2024, 1, d))
            .energy(energy)
            .build()
            .await?;
    }

    let repo = EnergyUsageRepository::new(db);
    let rows = repo
        .get_range(GetEnergyUsageRangeParam {
            torn_id: 42,
            from: day(2024, 1, 10),
            to: day(2024, 1, 12),
        })
        .await?;

    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let energy: Vec<f64> = rows.iter().map(|r| r.energy).collect();
    assert_eq!(dates, vec![day(2024, 1, 10), day(2024, 1, 11), day(2024, 1, 12)]);
    assert_eq!(energy, vec![10.0, 20.0, 30.0]);

    Ok(())
}

/// Tests that another player's rows in the same range are not returned.
///
/// Expected: Ok with only the requested player's rows
#[tokio::test]
async fn filters_by_player() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EnergyUsage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_energy_usage(db, 42, day(2024, 1, 10)).await?;
    factory::create_energy_usage(db, 99, day(2024, 1, 10)).await?;

    let repo = EnergyUsageRepository::new(db);
    let rows = repo
        .get_range(GetEnergyUsageRangeParam {
            torn_id: 99,
            from: day(2024, 1, 1),
            to: day(2024, 1, 31),
        })
        .await?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].torn_id, 99);

    Ok(())
}

/// Tests an inverted range.
///
/// Expected: Ok with empty Vec
#[tokio::test]
async fn returns_empty_for_inverted_range() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EnergyUsage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_energy_usage(db, 42, day(2024, 1, 10)).await?;

    let repo = EnergyUsageRepository::new(db);
    let rows = repo
        .get_range(GetEnergyUsageRangeParam {
            torn_id: 42,
            from: day(2024, 1, 12),
            to: day(2024, 1, 8),
        })
        .await?;

    assert!(rows.is_empty());

    Ok(())
}
