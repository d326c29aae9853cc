use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::AppError, torn::TornClient};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

/// Installs the global tracing subscriber.
///
/// Log levels are read from `RUST_LOG`, falling back to `info` with sqlx query logging
/// suppressed.
///
/// # Returns
/// - `Ok(())` - Subscriber installed
/// - `Err(AppError::TracingErr)` - A global subscriber was already set
pub fn init_tracing() -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::TracingErr(e.to_string()))
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the `users`, `energy_usage` and
/// `gym_contribution` tables exist before the scheduler starts.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the Torn API client.
///
/// The underlying reqwest client applies the configured request timeout to every call.
///
/// # Arguments
/// - `config` - Application configuration containing the API base URL and timeout
///
/// # Returns
/// - `Ok(TornClient)` - Client ready to be shared with the scheduler
/// - `Err(AppError::ReqwestErr)` - HTTP client could not be built
/// - `Err(AppError::TornApiErr)` - Base URL is invalid
pub fn setup_torn_client(config: &Config) -> Result<TornClient, AppError> {
    let http = reqwest::Client::builder()
        .timeout(config.torn_api_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(TornClient::new(http, &config.torn_api_base_url)?)
}
