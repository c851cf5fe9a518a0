//! Route planning over a pinned snapshot.
//!
//! The search engine runs a generalized A* over either network; the path
//! reconstructor turns a goal-reaching parent chain into rider-facing
//! instruction tokens. [`Router`] ties both to the snapshot store and is
//! the query surface collaborators call.

mod astar;
mod config;
mod path;
mod router;

pub use config::RouterConfig;
pub use router::Router;
