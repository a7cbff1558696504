//! HTTP fetching for the upstream feeds
//!
//! Both feeds are public documents behind plain GETs. The `FeedSource` trait
//! is the seam between refresh coordination and the network, so tests can
//! drive refresh cycles with canned or failing sources.

use async_trait::async_trait;
use std::time::Duration;
use threatline_core::model::{Campaign, Group};
use tracing::debug;

use crate::galaxy::GalaxyCluster;
use crate::stix::{GraphIndex, StixBundle};
use crate::FeedResult;

const DEFAULT_GRAPH_URL: &str =
    "https://raw.githubusercontent.com/mitre/cti/master/enterprise-attack/enterprise-attack.json";
const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/MISP/misp-galaxy/main/clusters/threat-actor.json";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Upstream feed endpoints and fetch behavior
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Campaign graph (STIX bundle) endpoint
    pub graph_url: String,
    /// Actor catalog (galaxy cluster) endpoint
    pub catalog_url: String,
    /// Per-request timeout bound
    pub timeout_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            graph_url: DEFAULT_GRAPH_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl FeedConfig {
    pub fn with_graph_url(mut self, url: impl Into<String>) -> Self {
        self.graph_url = url.into();
        self
    }

    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// A source of both feeds. One call per feed per refresh cycle; the two
/// calls within a cycle may run concurrently.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the actor catalog into canonical groups, feed order.
    async fn fetch_groups(&self) -> FeedResult<Vec<Group>>;

    /// Fetch the campaign graph and index it into enriched campaigns,
    /// bundle order.
    async fn fetch_campaigns(&self) -> FeedResult<Vec<Campaign>>;
}

/// `FeedSource` implementation over HTTP
pub struct HttpFeedClient {
    config: FeedConfig,
    client: reqwest::Client,
}

impl HttpFeedClient {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_text(&self, url: &str) -> FeedResult<String> {
        debug!(url, "fetching feed");
        let body = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(url, bytes = body.len(), "feed fetched");
        Ok(body)
    }
}

#[async_trait]
impl FeedSource for HttpFeedClient {
    async fn fetch_groups(&self) -> FeedResult<Vec<Group>> {
        let body = self.fetch_text(&self.config.catalog_url).await?;
        let cluster = GalaxyCluster::parse(&body)?;
        Ok(cluster.into_groups())
    }

    async fn fetch_campaigns(&self) -> FeedResult<Vec<Campaign>> {
        let body = self.fetch_text(&self.config.graph_url).await?;
        let bundle = StixBundle::parse(&body)?;
        Ok(GraphIndex::from_bundle(bundle).into_campaigns())
    }
}
