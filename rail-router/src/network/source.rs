//! Snapshot document sources.
//!
//! Retrieval of the two network documents is a collaborator concern; the
//! store only needs something that can hand it the current raw JSON text
//! per network. This seam also lets the refresh path be tested against
//! in-memory documents.

use std::future::Future;
use std::path::{Path, PathBuf};

use super::error::SnapshotError;
use crate::domain::NetworkId;

/// Provides the current raw document for a network.
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current document text for `network`.
    fn fetch_document(
        &self,
        network: NetworkId,
    ) -> impl Future<Output = Result<String, SnapshotError>> + Send;
}

/// Reads network documents from local files.
///
/// Covers deployments where a collaborator keeps the fetched documents on
/// disk, and offline operation against a previously saved copy.
#[derive(Debug, Clone)]
pub struct FileSource {
    simple_path: PathBuf,
    typed_path: PathBuf,
}

impl FileSource {
    pub fn new(simple_path: impl Into<PathBuf>, typed_path: impl Into<PathBuf>) -> Self {
        Self {
            simple_path: simple_path.into(),
            typed_path: typed_path.into(),
        }
    }

    fn path_for(&self, network: NetworkId) -> &Path {
        match network {
            NetworkId::Simple => &self.simple_path,
            NetworkId::Typed => &self.typed_path,
        }
    }
}

impl SnapshotSource for FileSource {
    async fn fetch_document(&self, network: NetworkId) -> Result<String, SnapshotError> {
        Ok(tokio::fs::read_to_string(self.path_for(network)).await?)
    }
}
