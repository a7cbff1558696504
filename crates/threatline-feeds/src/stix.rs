//! STIX bundle parsing and typed graph indexing
//!
//! The graph feed is a flat `objects` array mixing node and edge types we
//! care about with dozens we do not. Partitioning happens once, into typed
//! collections keyed by id, instead of re-walking a dynamic tree per lookup.

use serde::Deserialize;
use std::collections::HashMap;
use threatline_core::model::Campaign;

/// Marker identifying ATT&CK knowledge-base reference URLs
pub const ATTACK_DOMAIN: &str = "attack.mitre.org";

const ATTRIBUTED_TO: &str = "attributed-to";
const CAMPAIGN_PREFIX: &str = "campaign--";
const INTRUSION_SET_PREFIX: &str = "intrusion-set--";

/// Placeholder name for campaign nodes the source ships without one
pub const UNKNOWN_CAMPAIGN: &str = "Unknown Campaign";

/// Top-level STIX bundle document
#[derive(Debug, Deserialize)]
pub struct StixBundle {
    #[serde(default)]
    pub objects: Vec<GraphObject>,
}

impl StixBundle {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Graph objects of interest, discriminated by the STIX `type` field.
///
/// The upstream schema is uncontrolled and adds types freely; everything
/// unrecognized collapses into `Other` and is dropped silently.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GraphObject {
    #[serde(rename = "campaign")]
    Campaign(CampaignNode),
    #[serde(rename = "intrusion-set")]
    IntrusionSet(IntrusionSetNode),
    #[serde(rename = "relationship")]
    Relationship(RelationshipEdge),
    #[serde(other)]
    Other,
}

/// Raw campaign node as delivered by the graph feed
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignNode {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    #[serde(default)]
    pub external_references: Vec<ExternalReference>,
}

/// Raw intrusion-set node; only the name is consumed downstream
#[derive(Debug, Clone, Deserialize)]
pub struct IntrusionSetNode {
    pub id: String,
    pub name: Option<String>,
}

/// Raw relationship edge between two graph nodes
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipEdge {
    pub relationship_type: Option<String>,
    pub source_ref: Option<String>,
    pub target_ref: Option<String>,
}

/// External reference entry; fields other than `url` are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalReference {
    pub url: Option<String>,
}

/// Typed index over one graph feed document.
///
/// Campaign nodes keep bundle order. Attribution targets per campaign keep
/// edge encounter order; the first target is the authoritative attribution
/// when a campaign carries several.
#[derive(Debug, Default)]
pub struct GraphIndex {
    campaigns: Vec<CampaignNode>,
    intrusion_sets: HashMap<String, IntrusionSetNode>,
    attributions: HashMap<String, Vec<String>>,
}

impl GraphIndex {
    /// Partition a bundle into typed node tables and the attribution edge
    /// index. Single pass over the objects; unknown types were already
    /// dropped at parse time.
    pub fn from_bundle(bundle: StixBundle) -> Self {
        let mut index = GraphIndex::default();
        let mut edges = Vec::new();

        for object in bundle.objects {
            match object {
                GraphObject::Campaign(node) => index.campaigns.push(node),
                GraphObject::IntrusionSet(node) => {
                    index.intrusion_sets.insert(node.id.clone(), node);
                }
                GraphObject::Relationship(edge) => edges.push(edge),
                GraphObject::Other => {}
            }
        }

        for edge in edges {
            index.add_attribution(edge);
        }

        index
    }

    /// Record an attribution edge. Edges that are not `attributed-to`, or
    /// whose refs violate the campaign/intrusion-set prefix contract, are
    /// dropped rather than errored.
    fn add_attribution(&mut self, edge: RelationshipEdge) {
        if edge.relationship_type.as_deref() != Some(ATTRIBUTED_TO) {
            return;
        }
        let (Some(source), Some(target)) = (edge.source_ref, edge.target_ref) else {
            return;
        };
        if !source.starts_with(CAMPAIGN_PREFIX) || !target.starts_with(INTRUSION_SET_PREFIX) {
            return;
        }
        self.attributions.entry(source).or_default().push(target);
    }

    /// Name of the first attributed intrusion-set for a campaign.
    ///
    /// Only the first edge in encounter order counts; a dangling first edge
    /// (target missing from the node table, or a nameless node) makes the
    /// campaign unattributed.
    pub fn attributed_group(&self, campaign_id: &str) -> Option<&str> {
        let first = self.attributions.get(campaign_id)?.first()?;
        self.intrusion_sets.get(first)?.name.as_deref()
    }

    pub fn campaign_count(&self) -> usize {
        self.campaigns.len()
    }

    /// Convert the index into enriched campaign records, in bundle order.
    pub fn into_campaigns(self) -> Vec<Campaign> {
        let mut campaigns = Vec::with_capacity(self.campaigns.len());

        for node in &self.campaigns {
            let group = self.attributed_group(&node.id).map(str::to_string);
            let sources: Vec<String> = node
                .external_references
                .iter()
                .filter_map(|r| r.url.clone())
                .collect();
            let attack_url = sources.iter().find(|u| u.contains(ATTACK_DOMAIN)).cloned();

            campaigns.push(Campaign {
                id: node.id.clone(),
                name: node
                    .name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_CAMPAIGN.to_string()),
                description: node.description.clone(),
                first_seen: node.first_seen.clone(),
                last_seen: node.last_seen.clone(),
                sources,
                group,
                attack_url,
            });
        }

        campaigns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(json: serde_json::Value) -> StixBundle {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_partition_ignores_unknown_types() {
        let bundle = bundle(serde_json::json!({
            "objects": [
                {"type": "campaign", "id": "campaign--1", "name": "Op One"},
                {"type": "intrusion-set", "id": "intrusion-set--1", "name": "APT1"},
                {"type": "x-mitre-tactic", "id": "x-mitre-tactic--9", "shortname": "impact"},
                {"type": "malware", "id": "malware--2", "name": "Loader"},
                {"type": "relationship", "relationship_type": "uses",
                 "source_ref": "campaign--1", "target_ref": "malware--2"}
            ]
        }));

        let index = GraphIndex::from_bundle(bundle);
        assert_eq!(index.campaign_count(), 1);
        assert_eq!(index.intrusion_sets.len(), 1);
        // "uses" is not an attribution
        assert!(index.attributed_group("campaign--1").is_none());
    }

    #[test]
    fn test_attribution_prefix_contract() {
        let bundle = bundle(serde_json::json!({
            "objects": [
                {"type": "campaign", "id": "campaign--1", "name": "Op One"},
                {"type": "intrusion-set", "id": "intrusion-set--1", "name": "APT1"},
                // wrong source prefix
                {"type": "relationship", "relationship_type": "attributed-to",
                 "source_ref": "malware--1", "target_ref": "intrusion-set--1"},
                // wrong target prefix
                {"type": "relationship", "relationship_type": "attributed-to",
                 "source_ref": "campaign--1", "target_ref": "threat-actor--1"},
                // missing refs
                {"type": "relationship", "relationship_type": "attributed-to"},
                // valid
                {"type": "relationship", "relationship_type": "attributed-to",
                 "source_ref": "campaign--1", "target_ref": "intrusion-set--1"}
            ]
        }));

        let index = GraphIndex::from_bundle(bundle);
        assert_eq!(index.attributed_group("campaign--1"), Some("APT1"));
        assert_eq!(index.attributions["campaign--1"].len(), 1);
    }

    #[test]
    fn test_first_attribution_wins() {
        let bundle = bundle(serde_json::json!({
            "objects": [
                {"type": "campaign", "id": "campaign--1", "name": "Shared Op"},
                {"type": "intrusion-set", "id": "intrusion-set--1", "name": "APT1"},
                {"type": "intrusion-set", "id": "intrusion-set--2", "name": "APT2"},
                {"type": "relationship", "relationship_type": "attributed-to",
                 "source_ref": "campaign--1", "target_ref": "intrusion-set--1"},
                {"type": "relationship", "relationship_type": "attributed-to",
                 "source_ref": "campaign--1", "target_ref": "intrusion-set--2"}
            ]
        }));

        let index = GraphIndex::from_bundle(bundle);
        assert_eq!(index.attributed_group("campaign--1"), Some("APT1"));
    }

    #[test]
    fn test_dangling_edge_means_unattributed() {
        let bundle = bundle(serde_json::json!({
            "objects": [
                {"type": "campaign", "id": "campaign--1", "name": "Op One"},
                {"type": "intrusion-set", "id": "intrusion-set--2", "name": "APT2"},
                // first edge dangles; the second would resolve but first wins
                {"type": "relationship", "relationship_type": "attributed-to",
                 "source_ref": "campaign--1", "target_ref": "intrusion-set--gone"},
                {"type": "relationship", "relationship_type": "attributed-to",
                 "source_ref": "campaign--1", "target_ref": "intrusion-set--2"}
            ]
        }));

        let index = GraphIndex::from_bundle(bundle);
        assert_eq!(index.attributed_group("campaign--1"), None);

        let campaigns = index.into_campaigns();
        assert_eq!(campaigns[0].group, None);
    }

    #[test]
    fn test_campaign_extraction() {
        let bundle = bundle(serde_json::json!({
            "objects": [
                {"type": "campaign", "id": "campaign--1", "name": "Op One",
                 "description": "Long running intrusion",
                 "first_seen": "2021-03-05T00:00:00Z",
                 "last_seen": "2021-09-01T00:00:00Z",
                 "external_references": [
                    {"source_name": "vendor", "url": "https://vendor.example/report"},
                    {"url": "https://attack.mitre.org/campaigns/C0001/"},
                    {"source_name": "no-url-entry"}
                 ]}
            ]
        }));

        let campaigns = GraphIndex::from_bundle(bundle).into_campaigns();
        assert_eq!(campaigns.len(), 1);
        let c = &campaigns[0];
        assert_eq!(c.name, "Op One");
        assert_eq!(
            c.sources,
            vec![
                "https://vendor.example/report".to_string(),
                "https://attack.mitre.org/campaigns/C0001/".to_string()
            ]
        );
        assert_eq!(
            c.attack_url.as_deref(),
            Some("https://attack.mitre.org/campaigns/C0001/")
        );
    }

    #[test]
    fn test_nameless_campaign_gets_placeholder() {
        let bundle = bundle(serde_json::json!({
            "objects": [{"type": "campaign", "id": "campaign--1"}]
        }));

        let campaigns = GraphIndex::from_bundle(bundle).into_campaigns();
        assert_eq!(campaigns[0].name, UNKNOWN_CAMPAIGN);
    }

    #[test]
    fn test_unknown_fields_on_known_types_are_ignored() {
        let raw = r#"{
            "objects": [
                {"type": "campaign", "id": "campaign--1", "name": "Op",
                 "x_mitre_version": "1.0", "revoked": false}
            ]
        }"#;

        let bundle = StixBundle::parse(raw).unwrap();
        assert_eq!(GraphIndex::from_bundle(bundle).campaign_count(), 1);
    }
}
