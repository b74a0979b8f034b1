//! Errors from talking to the ruler and data source APIs.

/// Transport-level failures. "Not found" on a group fetch is never one of
/// these; it is reported as [`FetchedRuleGroup::Absent`](crate::model::FetchedRuleGroup).
#[derive(Debug, thiserror::Error)]
pub enum RulerApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl RulerApiError {
    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RulerApiError::Status { status, .. } => Some(*status),
            RulerApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
