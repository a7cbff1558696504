//! Campaign-to-actor enrichment
//!
//! Joins indexed campaigns to catalog actors. Attribution happened in the
//! graph index (campaign → intrusion-set name); here the attributed name is
//! looked up in the alias table to pull the canonical actor record and its
//! country. Two stages because the feeds share names, not identifiers.

use threatline_core::dates::{normalize_date, primary_date};
use threatline_core::model::{Campaign, DateRange, Group, TimelineEvent};
use threatline_feeds::AliasMap;

/// Label used when a campaign has no attribution or no country resolves
pub const UNKNOWN: &str = "Unknown";

/// Derive normalized timeline events from the current snapshot data, in
/// campaign order. Recomputed per read; never stored.
pub fn to_timeline_events(campaigns: &[Campaign], groups: &[Group]) -> Vec<TimelineEvent> {
    let alias_map = AliasMap::build(groups);
    campaigns
        .iter()
        .map(|campaign| enrich_one(campaign, &alias_map))
        .collect()
}

fn enrich_one(campaign: &Campaign, alias_map: &AliasMap) -> TimelineEvent {
    let label = campaign.group.as_deref().unwrap_or(UNKNOWN);
    let matched = alias_map.resolve(label);

    let group_name = matched
        .map(|g| g.name.clone())
        .unwrap_or_else(|| label.to_string());
    let country = matched
        .and_then(|g| g.country.clone())
        .unwrap_or_else(|| UNKNOWN.to_string());

    TimelineEvent {
        group_name,
        country,
        campaign: campaign.name.clone(),
        date: primary_date(campaign.first_seen.as_deref(), campaign.last_seen.as_deref()),
        date_range: DateRange {
            first_seen: campaign.first_seen.as_deref().and_then(normalize_date),
            last_seen: campaign.last_seen.as_deref().and_then(normalize_date),
        },
        summary: campaign.description.clone(),
        source_url: campaign.sources.first().cloned(),
        attack_url: campaign.attack_url.clone(),
    }
}
