//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization and
//! a `create_*` convenience function for default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let row = factory::energy_usage::create_energy_usage(&db, user.torn_id, day).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let user = factory::user::UserFactory::new(&db)
//!     .torn_id(2_114_440)
//!     .username("Kaizen")
//!     .api_key("")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Tracked accounts
//! - `energy_usage` - Daily energy usage ledger rows
//! - `helpers` - Shared ID generation

pub mod energy_usage;
pub mod helpers;
pub mod user;

pub use energy_usage::create_energy_usage;
pub use user::create_user;
