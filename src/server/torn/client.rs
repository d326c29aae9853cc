//! Reqwest-backed Torn API client.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::server::{
    error::torn::TornApiError,
    torn::{
        model::{
            ApiErrorEnvelope, ContributorsResponse, GymStat, LogResponse, Profile,
            GYM_LOG_CATEGORY,
        },
        TornApi,
    },
};

/// Longest response body kept on a `TornApiError::Status`.
const MAX_ERROR_BODY_LEN: usize = 256;

/// Client for the Torn API.
///
/// Holds a shared `reqwest::Client` (timeout configured at construction in
/// `startup::setup_torn_client`) and the API base URL. The API key is supplied per call
/// since each tracked account authenticates with its own key.
#[derive(Clone)]
pub struct TornClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TornClient {
    /// Creates a new TornClient.
    ///
    /// # Arguments
    /// - `http` - Shared reqwest client
    /// - `base_url` - API root, e.g. `https://api.torn.com`
    ///
    /// # Returns
    /// - `Ok(TornClient)` - Client ready for use
    /// - `Err(TornApiError::Url)` - `base_url` is not a valid absolute URL
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, TornApiError> {
        let mut base_url = Url::parse(base_url)?;

        // Url::join replaces the last path segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    /// Builds `{base}/{endpoint}?key=..&selections=..&{params}`.
    fn build_url(
        &self,
        api_key: &str,
        endpoint: &str,
        selections: &str,
        params: &[(&str, String)],
    ) -> Result<Url, TornApiError> {
        let mut url = self.base_url.join(endpoint)?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", api_key);
            query.append_pair("selections", selections);
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Sends a GET and decodes the body, surfacing Torn's error envelope as an error.
    ///
    /// The URL carries the API key, so it is stripped from transport errors.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, TornApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TornApiError::Request(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TornApiError::Request(e.without_url()))?;

        if status != StatusCode::OK {
            return Err(TornApiError::Status {
                status,
                body: truncate_body(body),
            });
        }

        if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body) {
            return Err(TornApiError::Api {
                code: envelope.error.code,
                message: envelope.error.error,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Cuts an error response body down to `MAX_ERROR_BODY_LEN` bytes on a char boundary.
fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body;
    }

    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body.push_str("...");
    body
}

#[async_trait]
impl TornApi for TornClient {
    async fn fetch_energy_used(
        &self,
        api_key: &str,
        from: i64,
        to: i64,
    ) -> Result<f64, TornApiError> {
        let url = self.build_url(
            api_key,
            "user",
            "log",
            &[
                ("cat", GYM_LOG_CATEGORY.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ],
        )?;

        let response: LogResponse = self.get(url).await?;

        tracing::trace!(
            "Fetched {} gym log entries for window {}..={}",
            response.log.len(),
            from,
            to
        );

        Ok(response.total_energy_used())
    }

    async fn fetch_signup(&self, api_key: &str) -> Result<DateTime<Utc>, TornApiError> {
        let url = self.build_url(api_key, "user", "profile", &[])?;

        let profile: Profile = self.get(url).await?;

        profile.signup_time()
    }

    async fn fetch_gym_contributors(
        &self,
        api_key: &str,
        stat: GymStat,
    ) -> Result<HashMap<i64, i64>, TornApiError> {
        let url = self.build_url(
            api_key,
            "faction",
            "contributors",
            &[("stat", stat.as_param().to_string())],
        )?;

        let response: ContributorsResponse = self.get(url).await?;

        Ok(response.contributed_by_player())
    }
}
