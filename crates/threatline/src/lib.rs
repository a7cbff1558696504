//! # Threatline - Threat Intelligence Timeline Aggregator
//!
//! Threatline aggregates two independently-maintained public
//! threat-intelligence feeds — the ATT&CK campaign graph and the MISP Galaxy
//! threat-actor catalog — into a single normalized, queryable timeline of
//! attributed campaigns.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use threatline::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(HttpFeedClient::new(FeedConfig::default()));
//!     let cache = Arc::new(SnapshotCache::new());
//!     let refresher = Arc::new(Refresher::new(cache.clone(), client));
//!
//!     refresher.refresh().await?;
//!
//!     let snapshot = cache.read().await;
//!     let events = to_timeline_events(&snapshot.campaigns, &snapshot.groups);
//!     println!("{} timeline events", events.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`threatline-core`**: data models and date normalization
//! - **`threatline-feeds`**: STIX graph indexing, alias resolution, HTTP fetching
//! - **`threatline-engine`**: enrichment, timeline queries, snapshot cache, refresh
//! - **`threatline-api`**: REST surface
//! - **`threatline-cli`**: command-line entry point

// Re-export public APIs from sub-crates (feature-gated)

#[cfg(feature = "threatline-core")]
pub use threatline_core as core;

#[cfg(feature = "threatline-feeds")]
pub use threatline_feeds as feeds;

#[cfg(feature = "threatline-engine")]
pub use threatline_engine as engine;

#[cfg(feature = "threatline-api")]
pub use threatline_api as api;

// Convenience re-exports for common types (feature-gated)
#[cfg(feature = "threatline-core")]
pub use threatline_core::model;

#[cfg(feature = "threatline-engine")]
pub use threatline_engine::{RefreshError, Refresher, SnapshotCache};

#[cfg(feature = "threatline-feeds")]
pub use threatline_feeds::{FeedConfig, FeedError, FeedSource, HttpFeedClient};

// Commonly used external dependencies
pub use anyhow;
pub use chrono;
pub use serde;
pub use serde_json;
pub use tokio;

/// Prelude module for convenient imports
///
/// ```rust
/// use threatline::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "threatline-core")]
    pub use crate::model::*;

    #[cfg(feature = "threatline-engine")]
    pub use threatline_engine::{
        to_timeline_events, RefreshError, Refresher, SnapshotCache, SortOrder, TimelineFilter,
    };

    #[cfg(feature = "threatline-feeds")]
    pub use threatline_feeds::{
        AliasMap, FeedConfig, FeedError, FeedSource, GraphIndex, HttpFeedClient,
    };

    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
    pub use tokio;
}

/// Current version of Threatline
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
