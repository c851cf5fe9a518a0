//! Published network state and the refresh lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::alias::AliasTable;
use super::error::SnapshotError;
use super::record::parse_document;
use super::snapshot::NetworkSnapshot;
use super::source::SnapshotSource;
use crate::domain::NetworkId;

/// One published generation of a network: the snapshot plus the alias
/// table rebuilt alongside it.
#[derive(Debug)]
pub struct NetworkState {
    pub snapshot: NetworkSnapshot,
    pub aliases: AliasTable,
}

impl NetworkState {
    /// State for a network that has not been refreshed yet.
    pub fn empty(network: NetworkId) -> Self {
        Self {
            snapshot: NetworkSnapshot::empty(network),
            aliases: AliasTable::default(),
        }
    }
}

/// Thread-safe store of the current generation of both networks.
///
/// Cloning is cheap and shares the underlying slots. A query pins one
/// generation by cloning the inner `Arc` once and then reads it without
/// further synchronization; a refresh publishes a new generation with a
/// single write-lock swap and never touches a published snapshot.
#[derive(Clone)]
pub struct GraphStore {
    simple: Arc<RwLock<Arc<NetworkState>>>,
    typed: Arc<RwLock<Arc<NetworkState>>>,
}

impl GraphStore {
    /// Create a store with empty snapshots for both networks.
    pub fn new() -> Self {
        Self {
            simple: Arc::new(RwLock::new(Arc::new(NetworkState::empty(NetworkId::Simple)))),
            typed: Arc::new(RwLock::new(Arc::new(NetworkState::empty(NetworkId::Typed)))),
        }
    }

    fn slot(&self, network: NetworkId) -> &Arc<RwLock<Arc<NetworkState>>> {
        match network {
            NetworkId::Simple => &self.simple,
            NetworkId::Typed => &self.typed,
        }
    }

    /// Pin the current generation of a network for the duration of a query.
    pub async fn pin(&self, network: NetworkId) -> Arc<NetworkState> {
        self.slot(network).read().await.clone()
    }

    /// Fetch, parse, and publish a new generation for one network.
    ///
    /// On failure the previous generation stays published and the error is
    /// returned. Returns the node count of the published snapshot.
    pub async fn refresh<S: SnapshotSource>(
        &self,
        network: NetworkId,
        source: &S,
    ) -> Result<usize, SnapshotError> {
        debug!(%network, "refreshing network snapshot");

        let text = source.fetch_document(network).await?;
        let records = parse_document(network, &text)?;
        let snapshot = NetworkSnapshot::new(network, records);
        let aliases = AliasTable::build(&snapshot);
        let count = snapshot.len();

        let state = Arc::new(NetworkState { snapshot, aliases });
        *self.slot(network).write().await = state;

        info!(%network, nodes = count, "published network snapshot");
        Ok(count)
    }

    /// Refresh both networks concurrently.
    ///
    /// Each network publishes independently; a failure on one does not
    /// block the other. The first error encountered is returned.
    pub async fn refresh_all<S: SnapshotSource>(&self, source: &S) -> Result<(), SnapshotError> {
        let (simple, typed) = futures::future::join(
            self.refresh(NetworkId::Simple, source),
            self.refresh(NetworkId::Typed, source),
        )
        .await;

        simple?;
        typed?;
        Ok(())
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the periodic refresh task.
///
/// The interval's immediate first tick is skipped; callers wanting data at
/// startup do an explicit `refresh_all` first. A failed refresh keeps the
/// previous generations published and is retried on the next tick.
pub fn spawn_refresh<S>(
    store: GraphStore,
    source: S,
    every: Duration,
) -> tokio::task::JoinHandle<()>
where
    S: SnapshotSource + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = store.refresh_all(&source).await {
                warn!(error = %e, "network refresh failed, keeping previous snapshots");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory source serving fixed documents.
    struct MemorySource {
        simple: String,
        typed: String,
    }

    impl MemorySource {
        fn new(simple: &str, typed: &str) -> Self {
            Self {
                simple: simple.to_string(),
                typed: typed.to_string(),
            }
        }
    }

    impl SnapshotSource for MemorySource {
        async fn fetch_document(&self, network: NetworkId) -> Result<String, SnapshotError> {
            match network {
                NetworkId::Simple => Ok(self.simple.clone()),
                NetworkId::Typed => Ok(self.typed.clone()),
            }
        }
    }

    /// Source that always fails.
    struct BrokenSource;

    impl SnapshotSource for BrokenSource {
        async fn fetch_document(&self, _network: NetworkId) -> Result<String, SnapshotError> {
            Err(SnapshotError::Source("unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let store = GraphStore::new();
        assert!(store.pin(NetworkId::Simple).await.snapshot.is_empty());
        assert!(store.pin(NetworkId::Typed).await.snapshot.is_empty());
    }

    #[tokio::test]
    async fn refresh_publishes_snapshot_and_aliases() {
        let store = GraphStore::new();
        let source = MemorySource::new(
            r#"{"Spawn": {"station": true}, "Quarry": {}}"#,
            r#"{"nodes": {"p1": {"type": "stop", "name": ["Pine Hill"]}}}"#,
        );

        let count = store.refresh(NetworkId::Simple, &source).await.unwrap();
        assert_eq!(count, 2);

        store.refresh(NetworkId::Typed, &source).await.unwrap();

        let simple = store.pin(NetworkId::Simple).await;
        assert_eq!(simple.snapshot.resolve("Spawn"), Some("Spawn"));
        assert_eq!(simple.aliases.resolve("quarry"), Some("Quarry"));

        let typed = store.pin(NetworkId::Typed).await;
        assert_eq!(typed.snapshot.resolve("Pine Hill"), Some("p1"));
        assert_eq!(typed.aliases.resolve("pine hill"), Some("p1"));
    }

    #[tokio::test]
    async fn pinned_generation_survives_refresh() {
        let store = GraphStore::new();

        let first = MemorySource::new(r#"{"Old": {}}"#, r#"{"nodes": {}}"#);
        store.refresh(NetworkId::Simple, &first).await.unwrap();

        let pinned = store.pin(NetworkId::Simple).await;
        assert!(pinned.snapshot.resolve("Old").is_some());

        let second = MemorySource::new(r#"{"New": {}}"#, r#"{"nodes": {}}"#);
        store.refresh(NetworkId::Simple, &second).await.unwrap();

        // The pinned generation is untouched; a fresh pin sees the swap.
        assert!(pinned.snapshot.resolve("Old").is_some());
        assert!(pinned.snapshot.resolve("New").is_none());

        let current = store.pin(NetworkId::Simple).await;
        assert!(current.snapshot.resolve("New").is_some());
        assert!(current.snapshot.resolve("Old").is_none());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_generation() {
        let store = GraphStore::new();

        let good = MemorySource::new(r#"{"Spawn": {}}"#, r#"{"nodes": {}}"#);
        store.refresh_all(&good).await.unwrap();

        assert!(store.refresh_all(&BrokenSource).await.is_err());

        let state = store.pin(NetworkId::Simple).await;
        assert_eq!(state.snapshot.resolve("Spawn"), Some("Spawn"));
    }

    #[tokio::test]
    async fn malformed_document_keeps_previous_generation() {
        let store = GraphStore::new();

        let good = MemorySource::new(r#"{"Spawn": {}}"#, r#"{"nodes": {}}"#);
        store.refresh_all(&good).await.unwrap();

        let bad = MemorySource::new("not json", r#"{"nodes": {}}"#);
        let err = store.refresh(NetworkId::Simple, &bad).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Json { .. }));

        let state = store.pin(NetworkId::Simple).await;
        assert_eq!(state.snapshot.resolve("Spawn"), Some("Spawn"));
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let store = GraphStore::new();
        let clone = store.clone();

        let source = MemorySource::new(r#"{"Spawn": {}}"#, r#"{"nodes": {}}"#);
        store.refresh(NetworkId::Simple, &source).await.unwrap();

        let state = clone.pin(NetworkId::Simple).await;
        assert_eq!(state.snapshot.resolve("Spawn"), Some("Spawn"));
    }
}
