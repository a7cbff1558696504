//! Refresh coordination
//!
//! One long-lived periodic task plus on-demand forced refreshes share a
//! single cache slot. Refresh itself is exclusive: a mutex guard serializes
//! cycles, and a forced refresh is rejected while one is in flight instead
//! of interleaving. Readers are unaffected either way; they keep the prior
//! snapshot until the atomic swap.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use threatline_feeds::{FeedError, FeedSource};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::cache::SnapshotCache;

const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(12 * 60 * 60);

/// Errors surfaced by refresh cycles
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// Another refresh holds the guard; the caller should retry later
    #[error("a refresh is already in progress")]
    InProgress,

    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// Coordinates periodic and forced refreshes against one snapshot cache
pub struct Refresher {
    cache: Arc<SnapshotCache>,
    source: Arc<dyn FeedSource>,
    interval: Duration,
    guard: Mutex<()>,
}

impl Refresher {
    pub fn new(cache: Arc<SnapshotCache>, source: Arc<dyn FeedSource>) -> Self {
        Self {
            cache,
            source,
            interval: DEFAULT_REFRESH_INTERVAL,
            guard: Mutex::new(()),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn cache(&self) -> Arc<SnapshotCache> {
        Arc::clone(&self.cache)
    }

    /// Run one exclusive refresh cycle, waiting for any in-flight cycle to
    /// finish first.
    pub async fn refresh(&self) -> Result<DateTime<Utc>, RefreshError> {
        let _guard = self.guard.lock().await;
        self.fetch_and_swap().await
    }

    /// Forced refresh: rejects with [`RefreshError::InProgress`] instead of
    /// queueing when a cycle is already running.
    pub async fn try_refresh(&self) -> Result<DateTime<Utc>, RefreshError> {
        let _guard = self
            .guard
            .try_lock()
            .map_err(|_| RefreshError::InProgress)?;
        self.fetch_and_swap().await
    }

    /// Fetch both feeds in parallel and publish the pair atomically. Any
    /// failure aborts the cycle with the cache untouched.
    async fn fetch_and_swap(&self) -> Result<DateTime<Utc>, RefreshError> {
        let (groups, campaigns) =
            tokio::try_join!(self.source.fetch_groups(), self.source.fetch_campaigns())?;

        let group_count = groups.len();
        let campaign_count = campaigns.len();
        let fetched_at = self.cache.replace(groups, campaigns).await;
        info!(
            groups = group_count,
            campaigns = campaign_count,
            %fetched_at,
            "snapshot refreshed"
        );
        Ok(fetched_at)
    }

    /// Long-lived periodic loop: warms the cache immediately, then refreshes
    /// on the configured interval. A failed cycle is logged and the prior
    /// snapshot stays authoritative until the next attempt.
    pub async fn run(&self) {
        loop {
            if let Err(error) = self.refresh().await {
                error!(%error, "feed refresh failed; serving prior snapshot");
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
