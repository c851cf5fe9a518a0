//! Immutable network snapshots and node materialization.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::record::RawNodeRecord;
use crate::domain::{NetworkId, Node, NodeKind, TypedRole};

/// Immutable copy of one network's data as of the last refresh.
///
/// A snapshot is never edited in place: refreshes build a replacement and
/// publish it wholesale, so a query that pinned an older generation keeps
/// reading it untouched.
#[derive(Debug, Clone)]
pub struct NetworkSnapshot {
    network: NetworkId,
    records: HashMap<String, RawNodeRecord>,
    /// Keys in lexicographic order, for deterministic scans.
    ordered_names: Vec<String>,
    fetched_at: DateTime<Utc>,
}

impl NetworkSnapshot {
    /// Build a snapshot from parsed records, stamped with the current time.
    pub fn new(network: NetworkId, records: HashMap<String, RawNodeRecord>) -> Self {
        let mut ordered_names: Vec<String> = records.keys().cloned().collect();
        ordered_names.sort();

        Self {
            network,
            records,
            ordered_names,
            fetched_at: Utc::now(),
        }
    }

    /// An empty snapshot, for a store that has not refreshed yet.
    pub fn empty(network: NetworkId) -> Self {
        Self::new(network, HashMap::new())
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw record for a canonical node name.
    pub fn get(&self, name: &str) -> Option<&RawNodeRecord> {
        self.records.get(name)
    }

    /// Iterate over all records.
    pub fn records(&self) -> impl Iterator<Item = (&String, &RawNodeRecord)> {
        self.records.iter()
    }

    /// Resolve rider input to a canonical node name.
    ///
    /// An exact key wins. The typed network additionally matches display
    /// names case-insensitively, scanning keys in lexicographic order so a
    /// display name shared by several nodes resolves deterministically.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        if let Some((name, _)) = self.records.get_key_value(text) {
            return Some(name.as_str());
        }

        if self.network == NetworkId::Typed {
            let lowered = text.to_lowercase();
            for name in &self.ordered_names {
                let Some(record) = self.records.get(name) else {
                    continue;
                };
                if record
                    .display_names
                    .iter()
                    .any(|display| display.to_lowercase() == lowered)
                {
                    return Some(name.as_str());
                }
            }
        }

        None
    }

    /// Materialize a traversal-ready node from its canonical name.
    ///
    /// Absent optional fields have already defaulted at parse time; nothing
    /// here can reject a present record.
    pub fn node(&self, name: &str) -> Option<Node> {
        let (key, record) = self.records.get_key_value(name)?;
        Some(materialize(self.network, key, record))
    }

    /// Advisories attached to the given stops, in input order.
    ///
    /// Stops without a record or without an advisory contribute nothing.
    pub fn advisories(&self, stops: &[String]) -> Vec<String> {
        stops
            .iter()
            .filter_map(|stop| self.records.get(stop))
            .filter_map(|record| record.advisory.clone())
            .collect()
    }
}

/// Convert a raw record into a traversal-ready node.
fn materialize(network: NetworkId, name: &str, record: &RawNodeRecord) -> Node {
    let (is_terminus, kind) = match network {
        NetworkId::Simple => (
            // A plain stop is neither a through-routable switch nor a
            // station used as a waypoint.
            !(record.station || record.switch),
            NodeKind::Simple {
                bad_links: record.bad_links.clone(),
            },
        ),
        NetworkId::Typed => {
            let role = TypedRole::from_tag(&record.node_type);
            (
                role == TypedRole::Stop,
                NodeKind::Typed {
                    role,
                    bad_links: record.bad_links.clone(),
                    unsafe_links: record.unsafe_links.clone(),
                    dest: record.dest.clone(),
                    dest_a: record.dest_a.clone(),
                    dest_b: record.dest_b.clone(),
                    dest_junction: record.dest_junction.clone(),
                    dest_stop: record.dest_stop.clone(),
                    link_dests: record.link_dests.clone(),
                },
            )
        }
    };

    Node {
        name: name.to_string(),
        x: record.x,
        z: record.z,
        links: record.links.clone(),
        is_terminus,
        kind,
    }
}
