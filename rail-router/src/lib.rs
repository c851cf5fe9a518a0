//! Rail route planning core.
//!
//! Answers "how do I travel from station A to station B" over two
//! independently-schemed rail networks: a simple station/switch graph and a
//! richer typed graph with segments, junctions, and crossings.
//!
//! Network data is published as immutable snapshots that a background task
//! replaces by atomic swap; each route query pins one snapshot generation
//! and runs synchronously to completion against it. Queries are pure
//! functions of the pinned snapshot and the request text — nothing is
//! cached or persisted between calls.

pub mod domain;
pub mod network;
pub mod planner;
