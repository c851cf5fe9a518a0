//! Route query facade.
//!
//! Resolves rider-supplied endpoint text, validates endpoint kinds,
//! runs the search, and reconstructs the result. Each call pins one
//! snapshot generation up front and is a pure function of that snapshot
//! and the request text.

use tracing::debug;

use crate::domain::{Endpoint, NetworkId, RouteResult, TypedRole};
use crate::network::{GraphStore, NetworkState};

use super::astar::{SearchOutcome, search};
use super::config::RouterConfig;
use super::path::{reconstruct_simple, reconstruct_typed};

/// Answers route and suggestion queries against the current snapshots.
#[derive(Clone)]
pub struct Router {
    store: GraphStore,
    config: RouterConfig,
}

impl Router {
    pub fn new(store: GraphStore, config: RouterConfig) -> Self {
        Self { store, config }
    }

    /// Find a route between two rider-supplied endpoint texts.
    ///
    /// Every outcome is a value: unresolved or invalid endpoints, an
    /// unreachable goal, and the degenerate same-node request all have
    /// their own variant.
    pub async fn find_route(
        &self,
        network: NetworkId,
        origin: &str,
        destination: &str,
    ) -> RouteResult {
        let state = self.store.pin(network).await;
        find_route_in(&state, network, origin, destination)
    }

    /// Candidate station names for free text that failed resolution.
    ///
    /// Bounded and deterministic; empty when nothing comes close.
    pub async fn suggest(&self, network: NetworkId, text: &str) -> Vec<String> {
        let state = self.store.pin(network).await;
        state
            .aliases
            .suggest(text, self.config.max_suggestions, self.config.similarity_cutoff)
    }

    /// Advisories attached to the given simple-network stops.
    pub async fn advisories(&self, stops: &[String]) -> Vec<String> {
        let state = self.store.pin(NetworkId::Simple).await;
        state.snapshot.advisories(stops)
    }
}

/// Resolve endpoint text to a canonical node name: exact key, then display
/// names, then the alias table.
fn resolve<'a>(state: &'a NetworkState, text: &str) -> Option<&'a str> {
    state
        .snapshot
        .resolve(text)
        .or_else(|| state.aliases.resolve(text))
}

fn valid_endpoint(state: &NetworkState, name: &str) -> bool {
    state
        .snapshot
        .get(name)
        .map(|record| TypedRole::from_tag(&record.node_type).valid_endpoint())
        .unwrap_or(false)
}

fn find_route_in(
    state: &NetworkState,
    network: NetworkId,
    origin: &str,
    destination: &str,
) -> RouteResult {
    let Some(origin_name) = resolve(state, origin) else {
        return RouteResult::UnresolvedEndpoint(Endpoint::Origin);
    };
    let Some(destination_name) = resolve(state, destination) else {
        return RouteResult::UnresolvedEndpoint(Endpoint::Destination);
    };

    if network == NetworkId::Typed {
        if !valid_endpoint(state, origin_name) {
            return RouteResult::InvalidEndpointKind(Endpoint::Origin);
        }
        if !valid_endpoint(state, destination_name) {
            return RouteResult::InvalidEndpointKind(Endpoint::Destination);
        }
    }

    match search(&state.snapshot, origin_name, destination_name) {
        SearchOutcome::Trivial => RouteResult::Trivial,
        SearchOutcome::Exhausted => RouteResult::NoPath,
        SearchOutcome::Reached(tree) => {
            let route = match network {
                NetworkId::Simple => reconstruct_simple(&tree),
                NetworkId::Typed => reconstruct_typed(&tree),
            };
            debug!(
                %network,
                tokens = route.tokens.len(),
                distance = route.distance,
                "route found"
            );
            RouteResult::Found(route)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Route;
    use crate::network::{SnapshotError, SnapshotSource};

    struct MemorySource {
        simple: String,
        typed: String,
    }

    impl SnapshotSource for MemorySource {
        async fn fetch_document(&self, network: NetworkId) -> Result<String, SnapshotError> {
            match network {
                NetworkId::Simple => Ok(self.simple.clone()),
                NetworkId::Typed => Ok(self.typed.clone()),
            }
        }
    }

    async fn router() -> Router {
        let source = MemorySource {
            simple: r#"{
                "Spawn": {"x": 0, "z": 0, "station": true, "links": ["j:mid"],
                          "advisory": "expect congestion"},
                "j:mid": {"x": 500, "z": 0, "switch": true, "links": ["Spawn", "Quarry"]},
                "Quarry": {"x": 1000, "z": 0, "links": ["j:mid"]},
                "Island": {"x": 0, "z": 9000}
            }"#
            .to_string(),
            typed: r#"{"nodes": {
                "P": {"x": 0, "z": 0, "type": "stop", "name": ["Pine Hill"],
                      "links": ["L1"], "dest": "Pine"},
                "L1": {"x": 50, "z": 0, "type": "line", "links": ["P", "Q"],
                       "dest_a": "West", "dest_b": "East"},
                "Q": {"x": 100, "z": 0, "type": "stop", "name": ["Quarry Stop"],
                      "links": ["L1"], "dest": "Quarry"},
                "lonely": {"x": 0, "z": 500, "type": "stop", "dest": "Lonely"}
            }}"#
            .to_string(),
        };

        let store = GraphStore::new();
        store.refresh_all(&source).await.unwrap();
        Router::new(store, RouterConfig::default())
    }

    fn found(result: RouteResult) -> Route {
        match result {
            RouteResult::Found(route) => route,
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn simple_route_endpoints_match_request() {
        let router = router().await;

        let route = found(router.find_route(NetworkId::Simple, "Spawn", "Quarry").await);
        assert_eq!(route.tokens.first().unwrap(), "Spawn");
        assert_eq!(route.tokens.last().unwrap(), "Quarry");
        assert!(route.distance > 0.0);
    }

    #[tokio::test]
    async fn identical_endpoints_are_trivial() {
        let router = router().await;

        assert_eq!(
            router.find_route(NetworkId::Simple, "Spawn", "Spawn").await,
            RouteResult::Trivial
        );
        // Also when the two texts differ but resolve to the same node.
        assert_eq!(
            router.find_route(NetworkId::Typed, "P", "pine hill").await,
            RouteResult::Trivial
        );
    }

    #[tokio::test]
    async fn unreachable_goal_is_no_path() {
        let router = router().await;

        assert_eq!(
            router.find_route(NetworkId::Simple, "Spawn", "Island").await,
            RouteResult::NoPath
        );
    }

    #[tokio::test]
    async fn unresolved_endpoints_carry_their_side() {
        let router = router().await;

        assert_eq!(
            router.find_route(NetworkId::Simple, "Atlantis", "Quarry").await,
            RouteResult::UnresolvedEndpoint(Endpoint::Origin)
        );
        assert_eq!(
            router.find_route(NetworkId::Simple, "Spawn", "Atlantis").await,
            RouteResult::UnresolvedEndpoint(Endpoint::Destination)
        );
    }

    #[tokio::test]
    async fn infrastructure_endpoints_are_invalid_on_typed() {
        let router = router().await;

        assert_eq!(
            router.find_route(NetworkId::Typed, "L1", "Q").await,
            RouteResult::InvalidEndpointKind(Endpoint::Origin)
        );
        assert_eq!(
            router.find_route(NetworkId::Typed, "P", "L1").await,
            RouteResult::InvalidEndpointKind(Endpoint::Destination)
        );
    }

    #[tokio::test]
    async fn switches_are_fine_endpoints_on_simple() {
        let router = router().await;

        let route = found(router.find_route(NetworkId::Simple, "Spawn", "j:mid").await);
        assert_eq!(route.tokens.last().unwrap(), "j:mid:exit");
    }

    #[tokio::test]
    async fn display_names_resolve_on_typed() {
        let router = router().await;

        let route = found(
            router
                .find_route(NetworkId::Typed, "Pine Hill", "quarry stop")
                .await,
        );
        assert_eq!(route.tokens, vec!["East", "Quarry"]);
    }

    #[tokio::test]
    async fn case_insensitive_alias_resolves_on_simple() {
        let router = router().await;

        let route = found(router.find_route(NetworkId::Simple, "spawn", "QUARRY").await);
        assert_eq!(route.tokens.first().unwrap(), "Spawn");
    }

    #[tokio::test]
    async fn repeated_queries_are_deterministic() {
        let router = router().await;

        let first = router.find_route(NetworkId::Simple, "Spawn", "Quarry").await;
        for _ in 0..5 {
            let again = router.find_route(NetworkId::Simple, "Spawn", "Quarry").await;
            assert_eq!(again, first);
        }
    }

    #[tokio::test]
    async fn suggestions_for_near_misses() {
        let router = router().await;

        let suggestions = router.suggest(NetworkId::Simple, "quary").await;
        assert_eq!(suggestions, vec!["Quarry".to_string()]);
    }

    #[tokio::test]
    async fn no_match_means_empty_suggestions_and_unresolved_route() {
        let router = router().await;

        assert!(router.suggest(NetworkId::Simple, "xyzzyplugh").await.is_empty());
        assert_eq!(
            router
                .find_route(NetworkId::Simple, "xyzzyplugh", "Quarry")
                .await,
            RouteResult::UnresolvedEndpoint(Endpoint::Origin)
        );
    }

    #[tokio::test]
    async fn advisories_along_a_route() {
        let router = router().await;

        let route = found(router.find_route(NetworkId::Simple, "Spawn", "Quarry").await);
        let advisories = router.advisories(&route.tokens).await;
        assert_eq!(advisories, vec!["expect congestion".to_string()]);
    }

    #[tokio::test]
    async fn empty_store_resolves_nothing() {
        let router = Router::new(GraphStore::new(), RouterConfig::default());

        assert_eq!(
            router.find_route(NetworkId::Simple, "Spawn", "Quarry").await,
            RouteResult::UnresolvedEndpoint(Endpoint::Origin)
        );
        assert!(router.suggest(NetworkId::Simple, "Spawn").await.is_empty());
    }
}
