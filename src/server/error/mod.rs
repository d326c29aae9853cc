//! Error types for the sync backend.
//!
//! `AppError` is the top-level error returned by services, startup and the scheduler. It
//! wraps the domain-specific errors below through `#[from]` conversions so `?` works across
//! layer boundaries. Repositories return `sea_orm::DbErr` directly and the Torn client
//! returns `TornApiError`; per-account sync failures are captured as `SyncError` and
//! reported in the run summary rather than propagated.

pub mod config;
pub mod sync;
pub mod torn;

use thiserror::Error;

use crate::server::error::{config::ConfigError, torn::TornApiError};

/// Top-level application error type.
///
/// Aggregates every error that can surface from startup, services or the scheduler.
/// Nothing here maps to an HTTP response; callers log the error and either abort startup
/// or continue with the next scheduled run.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Torn API request, status, decode or error-envelope failure.
    #[error(transparent)]
    TornApiErr(#[from] TornApiError),

    /// HTTP client construction error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Background task panicked or was aborted before it could be joined.
    #[error(transparent)]
    JoinErr(#[from] tokio::task::JoinError),

    /// Logging subscriber could not be installed.
    #[error("Failed to initialize tracing: {0}")]
    TracingErr(String),
}
