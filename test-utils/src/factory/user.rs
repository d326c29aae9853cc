//! User factory for creating tracked account entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .torn_id(123456)
///     .username("CustomUser")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    torn_id: i64,
    username: String,
    api_key: String,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - torn_id: auto-incremented counter value
    /// - username: `"Player {id}"`
    /// - api_key: `"key_{id}"`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            torn_id: id as i64,
            username: format!("Player {}", id),
            api_key: format!("key_{}", id),
        }
    }

    /// Sets the Torn player ID.
    pub fn torn_id(mut self, torn_id: i64) -> Self {
        self.torn_id = torn_id;
        self
    }

    /// Sets the display name.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the API key. An empty key makes the account ineligible for sync.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            torn_id: ActiveValue::Set(self.torn_id),
            username: ActiveValue::Set(self.username),
            api_key: ActiveValue::Set(self.api_key),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a user with a specific Torn ID and API key.
pub async fn create_user_with_key(
    db: &DatabaseConnection,
    torn_id: i64,
    api_key: impl Into<String>,
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db)
        .torn_id(torn_id)
        .api_key(api_key)
        .build()
        .await
}
