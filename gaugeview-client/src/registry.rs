//! Node registry: `(zone, family)` to address resolution.
//!
//! The registry is a static table loaded at startup; nodes do not come and
//! go while the dashboard is running.

use serde::{Deserialize, Serialize};

/// One registered node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub zone: String,
    pub family: String,
    /// Base URL of the node's metric endpoints, without a trailing slash.
    pub address: String,
    /// Free-form health tag for listings (e.g. `"success"`).
    #[serde(default)]
    pub status: String,
}

/// Static lookup table over the registered nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
}

impl NodeRegistry {
    /// Build a registry from a node table.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// All registered nodes, in registration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Resolve a `(zone, family)` pair to its node, if one is registered.
    pub fn lookup_node(&self, zone: &str, family: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.zone == zone && n.family == family)
    }

    /// The families registered under a zone, sorted and deduplicated.
    pub fn lookup_families(&self, zone: &str) -> Vec<String> {
        let mut families: Vec<String> = self
            .nodes
            .iter()
            .filter(|n| n.zone == zone)
            .map(|n| n.family.clone())
            .collect();
        families.sort();
        families.dedup();
        families
    }

    /// All zones with at least one node, sorted and deduplicated.
    pub fn zones(&self) -> Vec<String> {
        let mut zones: Vec<String> = self.nodes.iter().map(|n| n.zone.clone()).collect();
        zones.sort();
        zones.dedup();
        zones
    }
}
