//! Snapshot cache with atomic publication
//!
//! One live snapshot at a time. Readers clone an `Arc` under a briefly-held
//! read lock, so a snapshot is immutable once published and queries never
//! wait on an in-flight refresh. There is no partial update path.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use threatline_core::model::{Campaign, Group, Snapshot};
use tokio::sync::RwLock;

/// Holder of the current enriched dataset plus its fetch timestamp
#[derive(Debug)]
pub struct SnapshotCache {
    inner: RwLock<Arc<Snapshot>>,
}

impl SnapshotCache {
    /// Start cold: no timestamp, empty lists.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(Snapshot::cold())),
        }
    }

    /// The latest complete snapshot. Never a half-written one; cheap enough
    /// to call per request.
    pub async fn read(&self) -> Arc<Snapshot> {
        self.inner.read().await.clone()
    }

    /// Atomically swap in a new warm snapshot with a fresh timestamp.
    /// Both feeds land together or not at all.
    pub async fn replace(&self, groups: Vec<Group>, campaigns: Vec<Campaign>) -> DateTime<Utc> {
        let fetched_at = Utc::now();
        let snapshot = Arc::new(Snapshot {
            fetched_at: Some(fetched_at),
            groups,
            campaigns,
        });
        *self.inner.write().await = snapshot;
        fetched_at
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_cold() {
        let cache = SnapshotCache::new();
        let snapshot = cache.read().await;
        assert!(!snapshot.is_warm());
        assert!(snapshot.groups.is_empty());
        assert!(snapshot.campaigns.is_empty());
    }

    #[tokio::test]
    async fn test_replace_publishes_complete_snapshot() {
        let cache = SnapshotCache::new();
        let fetched_at = cache.replace(vec![Group::new("APT28")], Vec::new()).await;

        let snapshot = cache.read().await;
        assert!(snapshot.is_warm());
        assert_eq!(snapshot.fetched_at, Some(fetched_at));
        assert_eq!(snapshot.groups.len(), 1);
    }

    #[tokio::test]
    async fn test_readers_keep_prior_snapshot_across_replace() {
        let cache = SnapshotCache::new();
        cache.replace(vec![Group::new("APT28")], Vec::new()).await;

        let before = cache.read().await;
        cache.replace(vec![Group::new("APT29")], Vec::new()).await;

        // An already-taken snapshot is immutable, whatever happens next
        assert_eq!(before.groups[0].name, "APT28");
        let after = cache.read().await;
        assert_eq!(after.groups[0].name, "APT29");
    }
}
