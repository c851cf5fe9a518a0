//! Domain types for the rail router.
//!
//! This module contains the core model: distance metrics over world
//! coordinates, the materialized node representation shared by both
//! networks, and the value types a route query produces.

mod distance;
mod node;
mod route;

pub use distance::{edge_cost, grid, straight_line};
pub use node::{Node, NodeKind, TypedRole};
pub use route::{Endpoint, NetworkId, Route, RouteResult};
