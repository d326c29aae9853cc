//! Domain models for faction gym contribution snapshots.

use chrono::NaiveDate;

/// One faction member's gym energy contributions as of a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GymContribution {
    /// Torn player ID.
    pub torn_id: i64,
    /// Day the snapshot was taken.
    pub date: NaiveDate,
    pub strength: i64,
    pub speed: i64,
    pub defense: i64,
    pub dexterity: i64,
    /// Sum of the four stats.
    pub total: i64,
}

impl GymContribution {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::gym_contribution::Model) -> Self {
        Self {
            torn_id: entity.torn_id,
            date: entity.date,
            strength: entity.strength,
            speed: entity.speed,
            defense: entity.defense,
            dexterity: entity.dexterity,
            total: entity.total,
        }
    }
}
