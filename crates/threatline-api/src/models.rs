//! API data models

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use threatline_core::dates::normalize_date;
use threatline_engine::query::clamp_limit;
use threatline_engine::{RefreshError, SortOrder, TimelineFilter};

/// Health check response: cache warmth plus record counts
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub name: String,
    pub status: String,
    pub fetched_at: Option<DateTime<Utc>>,
    pub groups: usize,
    pub campaigns: usize,
}

/// Forced-refresh success response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: String,
    pub fetched_at: DateTime<Utc>,
}

/// Error payload for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Raw timeline query parameters.
///
/// Parsed permissively: malformed date bounds become no bound, unknown sort
/// values fall back to the default, and the limit is clamped — a bad
/// parameter never turns into a hard error.
#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    /// Group name or resolved canonical name, matched exactly (case-insensitive)
    pub group: Option<String>,
    /// Origin country, e.g. "Russia" or "Unknown"
    pub country: Option<String>,
    /// Inclusive lower bound, YYYY-MM-DD
    pub from_date: Option<String>,
    /// Inclusive upper bound, YYYY-MM-DD
    pub to_date: Option<String>,
    pub limit: Option<usize>,
    /// `date_asc` or `date_desc` (default)
    pub sort: Option<String>,
}

impl TimelineQuery {
    pub fn into_filter(self) -> TimelineFilter {
        TimelineFilter {
            group: self.group,
            country: self.country,
            from_date: self.from_date.as_deref().and_then(normalize_date),
            to_date: self.to_date.as_deref().and_then(normalize_date),
            sort: self
                .sort
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
            limit: clamp_limit(self.limit),
        }
    }
}

/// Error types for API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("refresh already in progress")]
    RefreshInProgress,

    #[error("upstream feed failure: {0}")]
    UpstreamFailed(String),
}

impl From<RefreshError> for ApiError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::InProgress => ApiError::RefreshInProgress,
            RefreshError::Feed(e) => ApiError::UpstreamFailed(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::RefreshInProgress => StatusCode::CONFLICT,
            ApiError::UpstreamFailed(_) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
