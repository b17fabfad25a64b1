//! Typed HTTP failures from the Data API.

use reqwest::StatusCode;

/// A non-success response from the YouTube Data API.
///
/// Client methods return this wrapped in an [`eyre::Report`] (possibly under further context),
/// so use [`is_quota_exceeded`] rather than downcasting the outermost error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: String,
}

impl ApiError {
    /// Whether this is the "daily quota used up" rejection.
    ///
    /// YouTube reports this as a 403 whose error body names the `quotaExceeded` reason and
    /// mentions the quota in the message.
    pub fn is_quota_exceeded(&self) -> bool {
        self.status == StatusCode::FORBIDDEN && self.body.contains("quota")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "YouTube API request failed with status {}: {}",
            self.status, self.body
        )
    }
}

impl std::error::Error for ApiError {}

/// A request was attempted while no API key was available.
///
/// The key is resolved per request, so this can happen even after a credential check passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingApiKey;

impl std::fmt::Display for MissingApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("no YouTube API key configured")
    }
}

impl std::error::Error for MissingApiKey {}

/// Whether the failure was a request made without an API key.
pub fn is_missing_api_key(report: &eyre::Report) -> bool {
    report.chain().any(|e| e.is::<MissingApiKey>())
}

/// Whether any error in the chain is a quota rejection.
pub fn is_quota_exceeded(report: &eyre::Report) -> bool {
    report.chain().any(|e| {
        e.downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_quota_exceeded)
    })
}
