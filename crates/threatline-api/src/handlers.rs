//! API request handlers

use axum::{
    extract::{Extension, Query},
    response::Json as JsonResponse,
};
use std::sync::Arc;
use threatline_core::model::{Campaign, Group, TimelineEvent};
use threatline_engine::{query, to_timeline_events, Refresher, SnapshotCache};

use crate::models::*;
use crate::SERVICE_NAME;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SnapshotCache>,
    pub refresher: Arc<Refresher>,
}

impl AppState {
    pub fn new(refresher: Arc<Refresher>) -> Self {
        Self {
            cache: refresher.cache(),
            refresher,
        }
    }
}

/// Health check handler: cache warmth and record counts
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> JsonResponse<HealthResponse> {
    let snapshot = state.cache.read().await;
    JsonResponse(HealthResponse {
        name: SERVICE_NAME.to_string(),
        status: "ok".to_string(),
        fetched_at: snapshot.fetched_at,
        groups: snapshot.groups.len(),
        campaigns: snapshot.campaigns.len(),
    })
}

/// List all actor groups from the current snapshot
pub async fn get_groups(Extension(state): Extension<Arc<AppState>>) -> JsonResponse<Vec<Group>> {
    let snapshot = state.cache.read().await;
    JsonResponse(snapshot.groups.clone())
}

/// List all enriched campaigns from the current snapshot
pub async fn get_campaigns(
    Extension(state): Extension<Arc<AppState>>,
) -> JsonResponse<Vec<Campaign>> {
    let snapshot = state.cache.read().await;
    JsonResponse(snapshot.campaigns.clone())
}

/// Filterable, sortable timeline read. Events are derived from the snapshot
/// on every call so they always reflect the latest published data.
pub async fn get_timeline(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<TimelineQuery>,
) -> JsonResponse<Vec<TimelineEvent>> {
    let snapshot = state.cache.read().await;
    let events = to_timeline_events(&snapshot.campaigns, &snapshot.groups);
    JsonResponse(query::apply(events, &params.into_filter()))
}

/// Force a refresh cycle. Rejected with 409 while another refresh is in
/// flight; upstream failures surface as 502 and leave the cache untouched.
pub async fn force_refresh(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<JsonResponse<RefreshResponse>, ApiError> {
    let fetched_at = state.refresher.try_refresh().await?;
    Ok(JsonResponse(RefreshResponse {
        status: "refreshed".to_string(),
        fetched_at,
    }))
}
