//! Errors raised by the Torn API client.

use reqwest::StatusCode;
use thiserror::Error;

/// Torn API error codes that indicate a temporary condition on Torn's side.
///
/// - 5: Too many requests
/// - 8: IP block
/// - 9: API disabled
/// - 17: Backend error occurred
const TRANSIENT_API_CODES: [i64; 4] = [5, 8, 9, 17];

#[derive(Error, Debug)]
pub enum TornApiError {
    /// The configured base URL (or a path joined onto it) is not a valid URL.
    #[error("Invalid Torn API URL: {0}")]
    Url(#[from] url::ParseError),

    /// Network failure, timeout, or failure reading the response body.
    #[error("Torn API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API responded with a non-200 status code.
    #[error("Torn API returned status {status}: {body}")]
    Status {
        /// HTTP status returned
        status: StatusCode,
        /// Response body for diagnostics, truncated by the client
        body: String,
    },

    /// The response body was not the JSON shape expected for the selection.
    #[error("Failed to decode Torn API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Torn answered with its `{"error": {"code", "error"}}` envelope.
    #[error("Torn API error {code}: {message}")]
    Api {
        /// Torn error code
        code: i64,
        /// Torn error message
        message: String,
    },

    /// The profile `signup` field is not in `YYYY-MM-DD HH:MM:SS` form.
    #[error("Failed to parse signup time '{value}': {source}")]
    InvalidSignup {
        /// The raw signup string
        value: String,
        /// The underlying parse error
        #[source]
        source: chrono::ParseError,
    },
}

impl TornApiError {
    /// Whether retrying the same request later could succeed.
    ///
    /// # Returns
    /// - `true` - Network failures, 5xx and 429 statuses, and Torn's rate-limit/outage codes
    /// - `false` - Bad URLs, decode failures, invalid keys and other permanent errors
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Api { code, .. } => TRANSIENT_API_CODES.contains(code),
            Self::Url(_) | Self::Decode(_) | Self::InvalidSignup { .. } => false,
        }
    }
}
