// API integration tests for threatline-api

use async_trait::async_trait;
use axum::extract::{Extension, Query};
use std::sync::Arc;
use threatline_api::models::TimelineQuery;
use threatline_api::{handlers, AppState, SERVICE_NAME};
use threatline_core::model::{Campaign, Group};
use threatline_engine::{Refresher, SnapshotCache};
use threatline_feeds::{FeedResult, FeedSource};

struct StaticSource {
    groups: Vec<Group>,
    campaigns: Vec<Campaign>,
}

#[async_trait]
impl FeedSource for StaticSource {
    async fn fetch_groups(&self) -> FeedResult<Vec<Group>> {
        Ok(self.groups.clone())
    }

    async fn fetch_campaigns(&self) -> FeedResult<Vec<Campaign>> {
        Ok(self.campaigns.clone())
    }
}

fn campaign(id: &str, name: &str, group: Option<&str>, first_seen: Option<&str>) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        first_seen: first_seen.map(str::to_string),
        last_seen: None,
        sources: vec![format!("https://reports.example/{}", id)],
        group: group.map(str::to_string),
        attack_url: None,
    }
}

fn test_state() -> Arc<AppState> {
    let cache = Arc::new(SnapshotCache::new());
    let source = Arc::new(StaticSource {
        groups: vec![
            Group::new("APT28")
                .with_country("Russia")
                .with_aliases(vec!["Fancy Bear".to_string()]),
            Group::new("Lazarus Group").with_country("North Korea"),
        ],
        campaigns: vec![
            campaign(
                "campaign--1",
                "Frozen Lake",
                Some("Fancy Bear"),
                Some("2021-03-05T00:00:00Z"),
            ),
            campaign("campaign--2", "Harbor Light", None, None),
        ],
    });
    let refresher = Arc::new(Refresher::new(cache, source));
    Arc::new(AppState::new(refresher))
}

#[tokio::test]
async fn test_health_reports_cold_cache() {
    let state = test_state();
    let response = handlers::health(Extension(state)).await;

    assert_eq!(response.0.name, SERVICE_NAME);
    assert_eq!(response.0.status, "ok");
    assert!(response.0.fetched_at.is_none());
    assert_eq!(response.0.groups, 0);
    assert_eq!(response.0.campaigns, 0);
}

#[tokio::test]
async fn test_refresh_then_health_reports_counts() {
    let state = test_state();

    let refreshed = handlers::force_refresh(Extension(state.clone()))
        .await
        .expect("refresh should succeed");
    assert_eq!(refreshed.0.status, "refreshed");

    let health = handlers::health(Extension(state)).await;
    assert_eq!(health.0.fetched_at, Some(refreshed.0.fetched_at));
    assert_eq!(health.0.groups, 2);
    assert_eq!(health.0.campaigns, 2);
}

#[tokio::test]
async fn test_groups_and_campaigns_read_the_snapshot() {
    let state = test_state();
    state.refresher.try_refresh().await.unwrap();

    let groups = handlers::get_groups(Extension(state.clone())).await;
    assert_eq!(groups.0.len(), 2);
    assert_eq!(groups.0[0].name, "APT28");

    let campaigns = handlers::get_campaigns(Extension(state)).await;
    assert_eq!(campaigns.0.len(), 2);
    assert_eq!(campaigns.0[0].group.as_deref(), Some("Fancy Bear"));
}

#[tokio::test]
async fn test_timeline_resolves_aliases_and_filters() {
    let state = test_state();
    state.refresher.try_refresh().await.unwrap();

    let all = handlers::get_timeline(
        Extension(state.clone()),
        Query(TimelineQuery::default()),
    )
    .await;
    assert_eq!(all.0.len(), 2);

    let filtered = handlers::get_timeline(
        Extension(state),
        Query(TimelineQuery {
            group: Some("apt28".to_string()),
            ..Default::default()
        }),
    )
    .await;
    assert_eq!(filtered.0.len(), 1);
    let event = &filtered.0[0];
    assert_eq!(event.group_name, "APT28");
    assert_eq!(event.country, "Russia");
    assert_eq!(event.campaign, "Frozen Lake");
    assert_eq!(event.date, chrono::NaiveDate::from_ymd_opt(2021, 3, 5));
}

#[tokio::test]
async fn test_timeline_on_cold_cache_is_empty_not_an_error() {
    let state = test_state();
    let events =
        handlers::get_timeline(Extension(state), Query(TimelineQuery::default())).await;
    assert!(events.0.is_empty());
}

#[tokio::test]
async fn test_router_serves_health_end_to_end() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    let state = test_state();
    state.refresher.try_refresh().await.unwrap();
    let app = threatline_api::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health["name"], "threatline");
    assert_eq!(health["groups"], 2);
    assert_eq!(health["campaigns"], 2);
}

#[tokio::test]
async fn test_router_unknown_route_is_404() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    let state = test_state();
    let app = threatline_api::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_timeline_malformed_params_are_permissive() {
    let state = test_state();
    state.refresher.try_refresh().await.unwrap();

    let events = handlers::get_timeline(
        Extension(state),
        Query(TimelineQuery {
            from_date: Some("yesterday-ish".to_string()),
            sort: Some("sideways".to_string()),
            limit: Some(0),
            ..Default::default()
        }),
    )
    .await;
    // bad bound ignored, bad sort defaulted, limit clamped up to 1
    assert_eq!(events.0.len(), 1);
}
