use chrono::NaiveTime;
use std::time::Duration;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_TORN_API_BASE_URL: &str = "https://api.torn.com";
const DEFAULT_TORN_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ENERGY_SYNC_TIME: &str = "00:05";
const DEFAULT_ENERGY_SYNC_CONCURRENCY: usize = 1;

pub struct Config {
    pub database_url: String,

    pub torn_api_base_url: String,
    pub torn_api_timeout: Duration,
    /// API key with faction access used for the daily gym contributor snapshot.
    pub torn_faction_api_key: Option<String>,

    /// UTC wall-clock time the daily energy sync fires at.
    pub energy_sync_time: NaiveTime,
    pub energy_sync_on_startup: bool,
    pub energy_sync_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            torn_api_base_url: optional_var("TORN_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TORN_API_BASE_URL.to_string()),
            torn_api_timeout: Duration::from_secs(parse_var(
                "TORN_API_TIMEOUT_SECS",
                DEFAULT_TORN_API_TIMEOUT_SECS,
            )?),
            torn_faction_api_key: optional_var("TORN_FACTION_API_KEY"),
            energy_sync_time: parse_sync_time(
                "ENERGY_SYNC_TIME",
                optional_var("ENERGY_SYNC_TIME").as_deref(),
            )?,
            energy_sync_on_startup: parse_var("ENERGY_SYNC_ON_STARTUP", false)?,
            energy_sync_concurrency: parse_concurrency(
                "ENERGY_SYNC_CONCURRENCY",
                optional_var("ENERGY_SYNC_CONCURRENCY").as_deref(),
            )?,
        })
    }
}

/// Reads an environment variable, treating an empty value as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional environment variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_var(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}

/// Parses an `HH:MM` UTC time, defaulting to 00:05.
fn parse_sync_time(name: &str, value: Option<&str>) -> Result<NaiveTime, ConfigError> {
    let raw = value.unwrap_or(DEFAULT_ENERGY_SYNC_TIME);

    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Parses the number of accounts synced concurrently; zero is rejected.
fn parse_concurrency(name: &str, value: Option<&str>) -> Result<usize, ConfigError> {
    let Some(raw) = value else {
        return Ok(DEFAULT_ENERGY_SYNC_CONCURRENCY);
    };

    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.to_string(),
            reason: "must be at least 1".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
