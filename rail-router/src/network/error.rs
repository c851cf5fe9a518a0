//! Snapshot layer error types.

use crate::domain::NetworkId;

/// Errors from fetching or parsing a network document.
///
/// These stay inside the refresh path: a failed refresh keeps the previous
/// snapshot published, and route queries never see them.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading a document failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document is not valid JSON for the network's schema
    #[error("malformed {network} network document: {message}")]
    Json { network: NetworkId, message: String },

    /// The snapshot source failed to produce a document
    #[error("snapshot source error: {0}")]
    Source(String),
}
