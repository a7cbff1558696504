//! # Threatline Engine Library
//!
//! The join/normalization core: enriches indexed campaigns with actor data,
//! answers filtered/sorted timeline queries, and coordinates refresh cycles
//! against the atomically-published snapshot cache.

pub mod cache;
pub mod enrich;
pub mod query;
pub mod refresh;

pub use cache::SnapshotCache;
pub use enrich::to_timeline_events;
pub use query::{SortOrder, TimelineFilter};
pub use refresh::{RefreshError, Refresher};
