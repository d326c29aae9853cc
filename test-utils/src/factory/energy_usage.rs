//! Energy usage factory for seeding ledger rows.

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating energy usage rows.
///
/// # Example
///
/// ```rust,ignore
/// let row = EnergyUsageFactory::new(&db, 42, day).energy(150.0).build().await?;
/// ```
pub struct EnergyUsageFactory<'a> {
    db: &'a DatabaseConnection,
    torn_id: i64,
    date: NaiveDate,
    energy: f64,
}

impl<'a> EnergyUsageFactory<'a> {
    /// Creates a new factory for the given player and day with `energy` defaulting to `0.0`.
    pub fn new(db: &'a DatabaseConnection, torn_id: i64, date: NaiveDate) -> Self {
        Self {
            db,
            torn_id,
            date,
            energy: 0.0,
        }
    }

    /// Sets the energy used on that day.
    pub fn energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    /// Builds and inserts the row.
    ///
    /// # Returns
    /// - `Ok(entity::energy_usage::Model)` - Created row
    /// - `Err(DbErr)` - Database error, including a duplicate (torn_id, date)
    pub async fn build(self) -> Result<entity::energy_usage::Model, DbErr> {
        entity::energy_usage::ActiveModel {
            torn_id: ActiveValue::Set(self.torn_id),
            date: ActiveValue::Set(self.date),
            energy: ActiveValue::Set(self.energy),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an energy usage row with zero energy.
pub async fn create_energy_usage(
    db: &DatabaseConnection,
    torn_id: i64,
    date: NaiveDate,
) -> Result<entity::energy_usage::Model, DbErr> {
    EnergyUsageFactory::new(db, torn_id, date).build().await
}
