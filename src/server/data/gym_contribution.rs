//! Faction gym contribution snapshot repository.

use crate::server::model::gym_contribution::GymContribution;
use chrono::NaiveDate;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

/// Repository providing database operations for daily gym contribution snapshots.
pub struct GymContributionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GymContributionRepository<'a> {
    /// Creates a new GymContributionRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `GymContributionRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a day's snapshot, keeping any row that already exists.
    ///
    /// Rows are inserted one at a time with `ON CONFLICT DO NOTHING` on (torn_id, date),
    /// so re-running a snapshot for the same day never overwrites the first capture.
    ///
    /// # Arguments
    /// - `snapshot` - One row per faction member
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows newly inserted
    /// - `Err(DbErr)` - Database error during insert
    pub async fn save_snapshot(&self, snapshot: Vec<GymContribution>) -> Result<u64, DbErr> {
        let mut inserted = 0;

        for row in snapshot {
            let result = entity::prelude::GymContribution::insert(
                entity::gym_contribution::ActiveModel {
                    torn_id: ActiveValue::Set(row.torn_id),
                    date: ActiveValue::Set(row.date),
                    strength: ActiveValue::Set(row.strength),
                    speed: ActiveValue::Set(row.speed),
                    defense: ActiveValue::Set(row.defense),
                    dexterity: ActiveValue::Set(row.dexterity),
                    total: ActiveValue::Set(row.total),
                },
            )
            .on_conflict(
                OnConflict::columns([
                    entity::gym_contribution::Column::TornId,
                    entity::gym_contribution::Column::Date,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

            inserted += result;
        }

        Ok(inserted)
    }

    /// Gets a day's snapshot ordered by total contribution, highest first.
    ///
    /// # Arguments
    /// - `date` - Snapshot day
    ///
    /// # Returns
    /// - `Ok(Vec<GymContribution>)` - Rows for that day (empty if no snapshot was taken)
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_day(&self, date: NaiveDate) -> Result<Vec<GymContribution>, DbErr> {
        let entities = entity::prelude::GymContribution::find()
            .filter(entity::gym_contribution::Column::Date.eq(date))
            .order_by_desc(entity::gym_contribution::Column::Total)
            .order_by_asc(entity::gym_contribution::Column::TornId)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(GymContribution::from_entity)
            .collect())
    }
}
