//! CLI command definitions and execution

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use threatline_api::server::shutdown_signal;
use threatline_api::{ApiServer, ServerConfig};
use threatline_core::model::Snapshot;
use threatline_engine::{Refresher, SnapshotCache};
use threatline_feeds::{FeedConfig, FeedSource, HttpFeedClient};
use tracing::info;

/// Aggregates public threat-intelligence feeds into a queryable campaign timeline
#[derive(Debug, Parser)]
#[command(name = "threatline", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the aggregator HTTP service
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Bind port
        #[arg(long, default_value_t = 8000)]
        port: u16,

        /// Seconds between periodic feed refreshes
        #[arg(long, default_value_t = 12 * 60 * 60)]
        refresh_interval: u64,

        /// Override the campaign graph feed URL
        #[arg(long)]
        graph_url: Option<String>,

        /// Override the actor catalog feed URL
        #[arg(long)]
        catalog_url: Option<String>,
    },

    /// Fetch both feeds once and print the enriched snapshot as JSON
    Snapshot {
        /// Override the campaign graph feed URL
        #[arg(long)]
        graph_url: Option<String>,

        /// Override the actor catalog feed URL
        #[arg(long)]
        catalog_url: Option<String>,
    },
}

fn feed_config(graph_url: Option<String>, catalog_url: Option<String>) -> FeedConfig {
    let mut config = FeedConfig::default();
    if let Some(url) = graph_url {
        config = config.with_graph_url(url);
    }
    if let Some(url) = catalog_url {
        config = config.with_catalog_url(url);
    }
    config
}

/// Execute the parsed command
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve {
            host,
            port,
            refresh_interval,
            graph_url,
            catalog_url,
        } => serve(host, port, refresh_interval, feed_config(graph_url, catalog_url)).await,
        Command::Snapshot {
            graph_url,
            catalog_url,
        } => snapshot(feed_config(graph_url, catalog_url)).await,
    }
}

async fn serve(host: String, port: u16, refresh_interval: u64, feeds: FeedConfig) -> Result<()> {
    let client = Arc::new(HttpFeedClient::new(feeds));
    let cache = Arc::new(SnapshotCache::new());
    let refresher = Arc::new(
        Refresher::new(cache, client).with_interval(Duration::from_secs(refresh_interval)),
    );

    // Background task warms the cache immediately, then refreshes on the
    // interval; queries serve whatever snapshot is current.
    let background = Arc::clone(&refresher);
    tokio::spawn(async move { background.run().await });

    let server = ApiServer::with_config(ServerConfig { host, port }, refresher);
    server.run_with_shutdown(shutdown_signal()).await
}

async fn snapshot(feeds: FeedConfig) -> Result<()> {
    let client = HttpFeedClient::new(feeds);

    info!("fetching feeds for one-shot snapshot");
    let (groups, campaigns) =
        tokio::try_join!(client.fetch_groups(), client.fetch_campaigns())?;
    let snapshot = Snapshot::warm(groups, campaigns);

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
