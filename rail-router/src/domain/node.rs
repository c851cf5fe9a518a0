//! Traversal-ready node model.
//!
//! Raw document records are materialized into `Node`s before search. The
//! two networks share name, coordinates, and links but diverge completely
//! in reconstruction rules, so the divergent fields live behind a tagged
//! `NodeKind` variant rather than a trait hierarchy. The differently-derived
//! "cannot route through" flags of the two schemas are normalized into one
//! `is_terminus` field here, keeping the search engine network-agnostic.

use std::collections::HashMap;

/// Role tag of a typed-network node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedRole {
    /// Plain stop: travel ends here.
    Stop,
    Switch,
    Junction,
    Crossing,
    /// Segment node with direction-dependent endpoint names.
    Line,
    StopJunction,
    JunctionStop,
    /// Absent or unrecognized tag. Routable and a valid endpoint.
    Unknown,
}

impl TypedRole {
    /// Parse a role from a document type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "stop" => TypedRole::Stop,
            "switch" => TypedRole::Switch,
            "junction" => TypedRole::Junction,
            "crossing" => TypedRole::Crossing,
            "line" => TypedRole::Line,
            "stopjunction" => TypedRole::StopJunction,
            "junctionstop" => TypedRole::JunctionStop,
            _ => TypedRole::Unknown,
        }
    }

    /// Whether a node of this role may serve as a route endpoint.
    ///
    /// Pure infrastructure (switches, junctions, crossings, line segments)
    /// is passed through, never travelled to.
    pub fn valid_endpoint(self) -> bool {
        !matches!(
            self,
            TypedRole::Switch | TypedRole::Junction | TypedRole::Crossing | TypedRole::Line
        )
    }
}

/// Network-specific node fields.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Simple-network node.
    Simple {
        /// Outgoing link name → replacement display token for that edge.
        bad_links: HashMap<String, String>,
    },
    /// Typed-network node.
    Typed {
        role: TypedRole,
        /// Outgoing link name → replacement display token for that edge.
        bad_links: HashMap<String, String>,
        /// Outgoing links that must never be traversed.
        unsafe_links: Vec<String>,
        dest: String,
        dest_a: String,
        dest_b: String,
        dest_junction: String,
        dest_stop: String,
        /// Entry tokens for boarding the system from this node, keyed by
        /// the neighbor boarded towards.
        link_dests: HashMap<String, String>,
    },
}

/// A traversal-ready node, materialized from one snapshot record.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub x: f64,
    pub z: f64,
    /// Names of nodes reachable over one edge.
    pub links: Vec<String>,
    /// Travel cannot continue through this node; valid only as an endpoint.
    pub is_terminus: bool,
    pub kind: NodeKind,
}

impl Node {
    /// World position of this node.
    pub fn pos(&self) -> (f64, f64) {
        (self.x, self.z)
    }

    /// Replacement display token for the edge to `neighbor`, if the edge
    /// is a bad link.
    pub fn bad_link(&self, neighbor: &str) -> Option<&str> {
        let bad_links = match &self.kind {
            NodeKind::Simple { bad_links } => bad_links,
            NodeKind::Typed { bad_links, .. } => bad_links,
        };
        bad_links.get(neighbor).map(String::as_str)
    }

    /// Whether the edge to `neighbor` is forbidden.
    pub fn forbids(&self, neighbor: &str) -> bool {
        match &self.kind {
            NodeKind::Typed { unsafe_links, .. } => unsafe_links.iter().any(|l| l == neighbor),
            NodeKind::Simple { .. } => false,
        }
    }

    /// Role tag, for typed-network nodes.
    pub fn role(&self) -> Option<TypedRole> {
        match &self.kind {
            NodeKind::Typed { role, .. } => Some(*role),
            NodeKind::Simple { .. } => None,
        }
    }
}
