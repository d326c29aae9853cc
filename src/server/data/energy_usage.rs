//! Daily energy usage ledger repository.
//!
//! One row per (torn_id, date). Rows are written by the sync service through
//! `upsert_day` and read back by `most_recent_day` (to resume a sync) and `get_range`.

use crate::server::model::energy_usage::{
    EnergyUsage, GetEnergyUsageRangeParam, UpsertEnergyUsageParam,
};
use chrono::NaiveDate;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Repository providing database operations for the energy usage ledger.
pub struct EnergyUsageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EnergyUsageRepository<'a> {
    /// Creates a new EnergyUsageRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `EnergyUsageRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the latest day recorded for a player.
    ///
    /// # Arguments
    /// - `torn_id` - Torn player ID
    ///
    /// # Returns
    /// - `Ok(Some(NaiveDate))` - Most recent day with a stored row
    /// - `Ok(None)` - No rows exist for this player
    /// - `Err(DbErr)` - Database error during query
    pub async fn most_recent_day(&self, torn_id: i64) -> Result<Option<NaiveDate>, DbErr> {
        let latest = entity::prelude::EnergyUsage::find()
            .filter(entity::energy_usage::Column::TornId.eq(torn_id))
            .order_by_desc(entity::energy_usage::Column::Date)
            .limit(1)
            .one(self.db)
            .await?;

        Ok(latest.map(|row| row.date))
    }

    /// Inserts or overwrites one day of energy usage.
    ///
    /// On conflict with an existing (torn_id, date) row the stored energy is replaced, so
    /// writing the same day twice leaves exactly one row holding the second value.
    ///
    /// # Arguments
    /// - `param` - Player, UTC calendar day and energy used
    ///
    /// # Returns
    /// - `Ok(EnergyUsage)` - The row as stored
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert_day(&self, param: UpsertEnergyUsageParam) -> Result<EnergyUsage, DbErr> {
        let entity = entity::prelude::EnergyUsage::insert(entity::energy_usage::ActiveModel {
            torn_id: ActiveValue::Set(param.torn_id),
            date: ActiveValue::Set(param.date),
            energy: ActiveValue::Set(param.energy),
        })
        .on_conflict(
            OnConflict::columns([
                entity::energy_usage::Column::TornId,
                entity::energy_usage::Column::Date,
            ])
            .update_column(entity::energy_usage::Column::Energy)
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(EnergyUsage::from_entity(entity))
    }

    /// Gets a player's energy usage over an inclusive day range, oldest first.
    ///
    /// Days without a stored row are absent from the result rather than zero-filled.
    ///
    /// # Arguments
    /// - `param` - Player and inclusive `from..=to` day range
    ///
    /// # Returns
    /// - `Ok(Vec<EnergyUsage>)` - Stored rows within the range (empty if `from > to`)
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_range(
        &self,
        param: GetEnergyUsageRangeParam,
    ) -> Result<Vec<EnergyUsage>, DbErr> {
        let entities = entity::prelude::EnergyUsage::find()
            .filter(entity::energy_usage::Column::TornId.eq(param.torn_id))
            .filter(entity::energy_usage::Column::Date.between(param.from, param.to))
            .order_by_asc(entity::energy_usage::Column::Date)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(EnergyUsage::from_entity).collect())
    }
}
