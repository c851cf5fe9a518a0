//! Network snapshot layer.
//!
//! Holds the current immutable snapshot of each network's node records and
//! the alias table rebuilt alongside it, and drives the refresh lifecycle:
//! fetch a document through the [`SnapshotSource`] seam, parse it, rebuild
//! aliases, and publish the new generation by atomic swap.

mod alias;
mod error;
mod record;
mod snapshot;
mod source;
mod store;

pub use alias::{AliasTable, similarity};
pub use error::SnapshotError;
pub use record::{RawNodeRecord, parse_document};
pub use snapshot::NetworkSnapshot;
pub use source::{FileSource, SnapshotSource};
pub use store::{GraphStore, NetworkState, spawn_refresh};
