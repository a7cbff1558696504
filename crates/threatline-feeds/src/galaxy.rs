//! Actor catalog parsing and alias resolution
//!
//! The catalog feed (a MISP Galaxy cluster) is a flat list of actor entries.
//! Names and synonyms become a single case-insensitive lookup table used as
//! the join key against graph attributions, since the two feeds share no
//! identifiers.

use serde::Deserialize;
use std::collections::HashMap;
use threatline_core::model::Group;

/// Top-level galaxy cluster document
#[derive(Debug, Deserialize)]
pub struct GalaxyCluster {
    #[serde(default)]
    pub values: Vec<GalaxyEntry>,
}

impl GalaxyCluster {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Convert catalog entries to canonical groups, in feed order.
    /// Entries without a primary name are unusable as a join key and skipped.
    pub fn into_groups(self) -> Vec<Group> {
        self.values
            .into_iter()
            .filter_map(|entry| {
                let name = entry.value?;
                Some(Group {
                    name,
                    country: entry.meta.country,
                    aliases: entry.meta.synonyms,
                    refs: entry.meta.refs,
                })
            })
            .collect()
    }
}

/// One actor entry in the catalog
#[derive(Debug, Deserialize)]
pub struct GalaxyEntry {
    pub value: Option<String>,
    #[serde(default)]
    pub meta: GalaxyMeta,
}

/// Optional actor metadata
#[derive(Debug, Default, Deserialize)]
pub struct GalaxyMeta {
    pub country: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub refs: Vec<String>,
}

/// Case-insensitive lookup from every primary name and synonym to its owning
/// group.
///
/// Built in group order; later groups overwrite earlier ones on key collision.
/// Last-write-wins is the defined policy for aliases claimed by two actors,
/// not an accident of insertion order.
#[derive(Debug, Default)]
pub struct AliasMap {
    index: HashMap<String, Group>,
}

impl AliasMap {
    /// Build the lookup table. O(groups + total aliases).
    pub fn build(groups: &[Group]) -> Self {
        let mut index = HashMap::new();
        for group in groups {
            index.insert(group.name.to_lowercase(), group.clone());
            for alias in &group.aliases {
                index.insert(alias.to_lowercase(), group.clone());
            }
        }
        Self { index }
    }

    /// Resolve a name or alias to its canonical group, ignoring case.
    pub fn resolve(&self, name: &str) -> Option<&Group> {
        self.index.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
