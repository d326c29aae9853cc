//! Tracked account domain model.
//!
//! Accounts are created by the registration flow outside this crate; the sync pipeline
//! only reads them to know whose energy usage to poll.

/// Registered player whose API key authorizes polling the Torn API on their behalf.
#[derive(Clone, PartialEq, Eq)]
pub struct TrackedAccount {
    /// Torn player ID.
    pub torn_id: i64,
    /// Display name of the player.
    pub username: String,
    /// Torn API key. Never logged.
    pub api_key: String,
}

impl TrackedAccount {
    /// Converts an entity model to a tracked account at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `TrackedAccount` - The converted domain model
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            torn_id: entity.torn_id,
            username: entity.username,
            api_key: entity.api_key,
        }
    }
}

impl std::fmt::Debug for TrackedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedAccount")
            .field("torn_id", &self.torn_id)
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
