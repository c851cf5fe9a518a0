//! Route query value types.
//!
//! Every way a query can end is a value here, never an `Err`: callers
//! branch on the variant to decide what to tell the rider.

use std::fmt;

/// Identifies one of the two rail networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkId {
    /// Station/switch graph with boolean flags.
    Simple,
    /// Typed graph with segments, junctions, and crossings.
    Typed,
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Simple => f.write_str("simple"),
            NetworkId::Typed => f.write_str("typed"),
        }
    }
}

/// Which endpoint of a route request an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

/// A found route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Rider-facing instruction tokens in travel order.
    pub tokens: Vec<String>,
    /// Accumulated track distance over the whole chain.
    pub distance: f64,
}

/// Outcome of a route query.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult {
    Found(Route),
    /// Both endpoints valid; the search exhausted the network without
    /// reaching the goal.
    NoPath,
    /// Origin and destination resolve to the same node.
    Trivial,
    /// The endpoint text resolves to no node, display name, or alias.
    UnresolvedEndpoint(Endpoint),
    /// The endpoint resolves, but its role cannot serve as a route
    /// terminus. Typed network only.
    InvalidEndpointKind(Endpoint),
}
