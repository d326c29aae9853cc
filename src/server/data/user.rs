//! Account directory repository.
//!
//! This module provides the `UserRepository` used by the sync pipeline to read registered
//! accounts. Registration writes users elsewhere; nothing here mutates the table.

use crate::server::model::user::TrackedAccount;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

/// Repository providing read access to registered accounts.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every account eligible for energy sync.
    ///
    /// Accounts with an empty API key cannot authenticate against the Torn API and are
    /// skipped. Results are ordered by Torn ID so run logs are deterministic.
    ///
    /// # Returns
    /// - `Ok(Vec<TrackedAccount>)` - Accounts with a non-empty API key (empty if none)
    /// - `Err(DbErr)` - Database error during query
    pub async fn list_tracked_accounts(&self) -> Result<Vec<TrackedAccount>, DbErr> {
        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::ApiKey.ne(""))
            .order_by_asc(entity::user::Column::TornId)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(TrackedAccount::from_entity)
            .collect())
    }
}
