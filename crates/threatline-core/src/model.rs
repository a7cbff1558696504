//! Data models for actors, campaigns and derived timeline events

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical threat-actor record from the actor catalog feed.
///
/// Immutable after construction; one refresh produces a fixed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Primary name, unique within a snapshot
    pub name: String,
    /// Origin country as free text, when the catalog carries one
    pub country: Option<String>,
    /// Alternate names, order preserved from the feed
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Reference URLs
    #[serde(default)]
    pub refs: Vec<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: None,
            aliases: Vec::new(),
            refs: Vec::new(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_refs(mut self, refs: Vec<String>) -> Self {
        self.refs = refs;
        self
    }
}

/// Campaign node from the graph feed, enriched with its attributed group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Opaque stable identifier from the source graph
    pub id: String,
    /// Campaign name; "Unknown Campaign" when the source omits one
    pub name: String,
    pub description: Option<String>,
    /// Raw first-seen string as delivered by the feed, not guaranteed parseable
    pub first_seen: Option<String>,
    /// Raw last-seen string, same caveat as `first_seen`
    pub last_seen: Option<String>,
    /// External reference URLs, order preserved
    #[serde(default)]
    pub sources: Vec<String>,
    /// First attributed intrusion-set name, when the graph carries one
    pub group: Option<String>,
    /// First reference URL pointing at the ATT&CK knowledge base
    pub attack_url: Option<String>,
}

/// Independently parsed first/last dates of a campaign.
///
/// Each side is `None` when the raw feed value was absent or unparseable;
/// the pair is carried even when the event's primary date is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub first_seen: Option<NaiveDate>,
    pub last_seen: Option<NaiveDate>,
}

/// Normalized timeline event, recomputed from the snapshot on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Canonical actor name, the raw attributed name if the catalog has no
    /// match, or the literal "Unknown" when the campaign is unattributed
    pub group_name: String,
    /// Resolved origin country, or "Unknown"
    pub country: String,
    pub campaign: String,
    /// Primary date: first-seen preferred, last-seen fallback, else empty
    pub date: Option<NaiveDate>,
    pub date_range: DateRange,
    pub summary: Option<String>,
    /// First external reference URL, if any
    pub source_url: Option<String>,
    pub attack_url: Option<String>,
}

/// The atomic unit of cached state: one complete refresh result.
///
/// Either fully cold (no timestamp, empty lists) or fully warm (all three
/// populated together). Timeline events are derived on read, not stored, so
/// filtering always runs against the current actor/campaign data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// When this snapshot was fetched; `None` means the cache is cold
    pub fetched_at: Option<DateTime<Utc>>,
    pub groups: Vec<Group>,
    pub campaigns: Vec<Campaign>,
}

impl Snapshot {
    /// An empty snapshot that has never been refreshed
    pub fn cold() -> Self {
        Self::default()
    }

    /// A populated snapshot stamped with the current time
    pub fn warm(groups: Vec<Group>, campaigns: Vec<Campaign>) -> Self {
        Self {
            fetched_at: Some(Utc::now()),
            groups,
            campaigns,
        }
    }

    pub fn is_warm(&self) -> bool {
        self.fetched_at.is_some()
    }
}
