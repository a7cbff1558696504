//! # Threatline Feeds Library
//!
//! Read-only contracts with the two upstream feeds: the campaign graph
//! (STIX bundle) and the actor catalog (MISP Galaxy cluster). Parsing builds
//! typed indices over the heterogeneous graph and a case-insensitive alias
//! lookup; fetching goes through the `FeedSource` trait so refresh logic can
//! be exercised without the network.

pub mod client;
pub mod galaxy;
pub mod stix;

pub use client::{FeedConfig, FeedSource, HttpFeedClient};
pub use galaxy::AliasMap;
pub use stix::GraphIndex;

/// Feed operation result type
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors raised while fetching or decoding an upstream feed.
///
/// Any of these aborts the refresh cycle that hit them; the prior snapshot
/// stays authoritative.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed decode error: {0}")]
    Parse(#[from] serde_json::Error),
}
