//! Raw network document records.
//!
//! One DTO covers both schemas: every field beyond the coordinates is
//! optional upstream and defaults to false/empty here, so incomplete
//! records are materialized rather than rejected. Unknown fields are
//! ignored.

use std::collections::HashMap;

use serde::Deserialize;

use super::error::SnapshotError;
use crate::domain::NetworkId;

/// One node record as it appears in a network document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNodeRecord {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub links: Vec<String>,

    // Simple-network flags.
    #[serde(default)]
    pub station: bool,
    #[serde(default)]
    pub switch: bool,

    // Typed-network fields.
    #[serde(default, rename = "type")]
    pub node_type: String,
    /// Display names riders may use for this node.
    #[serde(default, rename = "name")]
    pub display_names: Vec<String>,
    /// Outgoing link name → replacement display token. The simple
    /// network's documents historically spell the key `BadLinks`.
    #[serde(default, alias = "BadLinks")]
    pub bad_links: HashMap<String, String>,
    #[serde(default)]
    pub unsafe_links: Vec<String>,
    #[serde(default)]
    pub dest: String,
    #[serde(default)]
    pub dest_a: String,
    #[serde(default)]
    pub dest_b: String,
    #[serde(default)]
    pub dest_junction: String,
    #[serde(default)]
    pub dest_stop: String,
    /// Entry tokens for boarding from this node, keyed by neighbor.
    #[serde(default)]
    pub link_dests: HashMap<String, String>,

    /// Free-text advisory attached to simple-network stations.
    #[serde(default)]
    pub advisory: Option<String>,
}

/// The typed network wraps its records in a `nodes` object.
#[derive(Debug, Deserialize)]
struct TypedDocument {
    #[serde(default)]
    nodes: HashMap<String, RawNodeRecord>,
}

/// Parse a network document into its name → record map.
pub fn parse_document(
    network: NetworkId,
    text: &str,
) -> Result<HashMap<String, RawNodeRecord>, SnapshotError> {
    match network {
        NetworkId::Simple => serde_json::from_str(text).map_err(|e| SnapshotError::Json {
            network,
            message: e.to_string(),
        }),
        NetworkId::Typed => {
            let doc: TypedDocument =
                serde_json::from_str(text).map_err(|e| SnapshotError::Json {
                    network,
                    message: e.to_string(),
                })?;
            Ok(doc.nodes)
        }
    }
}
