//! Wire types for the Torn API selections the sync pipeline reads.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::IgnoredAny, Deserialize, Deserializer};

use crate::server::error::torn::TornApiError;

/// Log category holding gym training entries.
pub const GYM_LOG_CATEGORY: u32 = 125;

/// Format of the profile `signup` field, always UTC.
const SIGNUP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body Torn sends, with HTTP 200, when a request is rejected.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub error: String,
}

/// `selections=log` response, keyed by opaque log entry ID.
#[derive(Debug, Deserialize)]
pub struct LogResponse {
    #[serde(default, deserialize_with = "deserialize_log")]
    pub log: HashMap<String, LogEntry>,
}

impl LogResponse {
    /// Sum of `energy_used` across every entry.
    pub fn total_energy_used(&self) -> f64 {
        self.log.values().map(|entry| entry.data.energy_used).sum()
    }
}

/// Entries also carry `log`, `title`, `timestamp` and `params`; only `data` is read.
#[derive(Debug, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub data: LogEntryData,
}

/// Gym entries carry more fields (trains, happy_used, gym, ...); only energy is read.
#[derive(Debug, Default, Deserialize)]
pub struct LogEntryData {
    #[serde(default)]
    pub energy_used: f64,
}

/// An empty log comes back as `[]` or `null` instead of `{}`.
fn deserialize_log<'de, D>(deserializer: D) -> Result<HashMap<String, LogEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLog {
        Entries(HashMap<String, LogEntry>),
        List(Vec<IgnoredAny>),
    }

    Ok(match Option::<RawLog>::deserialize(deserializer)? {
        Some(RawLog::Entries(entries)) => entries,
        Some(RawLog::List(_)) | None => HashMap::new(),
    })
}

/// `selections=profile` response; only the signup time is read.
#[derive(Debug, Deserialize)]
pub struct Profile {
    pub signup: String,
}

impl Profile {
    /// Parses `signup` as a UTC instant.
    pub fn signup_time(&self) -> Result<DateTime<Utc>, TornApiError> {
        NaiveDateTime::parse_from_str(&self.signup, SIGNUP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|source| TornApiError::InvalidSignup {
                value: self.signup.clone(),
                source,
            })
    }
}

/// Gym stats the faction contributors selection can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GymStat {
    Strength,
    Speed,
    Defense,
    Dexterity,
}

impl GymStat {
    pub const ALL: [GymStat; 4] = [
        GymStat::Strength,
        GymStat::Speed,
        GymStat::Defense,
        GymStat::Dexterity,
    ];

    /// Value of the `stat` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            GymStat::Strength => "gymstrength",
            GymStat::Speed => "gymspeed",
            GymStat::Defense => "gymdefense",
            GymStat::Dexterity => "gymdexterity",
        }
    }
}

/// `faction?selections=contributors` response: stat name → player ID → contribution.
#[derive(Debug, Deserialize)]
pub struct ContributorsResponse {
    #[serde(default)]
    pub contributors: HashMap<String, HashMap<i64, ContributorInfo>>,
}

impl ContributorsResponse {
    /// Contributed energy per player across every stat map in the response.
    pub fn contributed_by_player(self) -> HashMap<i64, i64> {
        self.contributors
            .into_values()
            .flat_map(|players| players.into_iter())
            .map(|(torn_id, info)| (torn_id, info.contributed))
            .collect()
    }
}

/// Members who left the faction still appear, with `in_faction` set to 0.
#[derive(Debug, Deserialize)]
pub struct ContributorInfo {
    pub contributed: i64,
}
