//! Domain models for the daily energy usage ledger.

use chrono::NaiveDate;

/// Energy one player used on one UTC calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyUsage {
    /// Torn player ID the usage belongs to.
    pub torn_id: i64,
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Total energy used on that day.
    pub energy: f64,
}

impl EnergyUsage {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::energy_usage::Model) -> Self {
        Self {
            torn_id: entity.torn_id,
            date: entity.date,
            energy: entity.energy,
        }
    }
}

/// Parameters for writing one day of energy usage.
///
/// Upserting the same (torn_id, date) twice overwrites the stored energy.
#[derive(Debug, Clone)]
pub struct UpsertEnergyUsageParam {
    /// Torn player ID.
    pub torn_id: i64,
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Total energy used on that day.
    pub energy: f64,
}

/// Parameters for reading a player's energy usage over an inclusive day range.
#[derive(Debug, Clone)]
pub struct GetEnergyUsageRangeParam {
    /// Torn player ID.
    pub torn_id: i64,
    /// First day included.
    pub from: NaiveDate,
    /// Last day included.
    pub to: NaiveDate,
}
