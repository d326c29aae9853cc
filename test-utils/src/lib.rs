//! KaizenHQ Test Utils
//!
//! Provides shared testing utilities for the KaizenHQ sync backend. This crate offers a
//! builder for creating test contexts with in-memory SQLite databases and factories for
//! seeding tracked accounts and energy usage rows.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Errors that can occur during test setup
//! - **factory**: Seed helpers for entities with sensible defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn reads_tracked_accounts() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_sync_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     test_utils::factory::user::create_user(db).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
