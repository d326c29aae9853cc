use std::sync::Arc;

use kaizen_hq::server::{
    config::Config, error::AppError, scheduler::energy_sync, startup, torn::TornApi,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    startup::init_tracing()?;

    let db = startup::connect_to_database(&config).await?;
    let torn_client: Arc<dyn TornApi> = Arc::new(startup::setup_torn_client(&config)?);

    tracing::info!("Starting energy sync service");

    let scheduler = energy_sync::start_scheduler(db, torn_client, &config);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");

    scheduler.stop().await?;

    Ok(())
}
