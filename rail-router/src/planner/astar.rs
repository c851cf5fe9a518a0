//! Generalized A* over a pinned network snapshot.
//!
//! One engine serves both schemas: terminus gating, forbidden edges, and
//! the typed network's line-segment coordinate handling are all resolved
//! through the materialized node, so the search itself never branches on
//! the network. Parent back-references live in a per-query arena
//! (name → id, id → node) instead of in the nodes themselves; the arena is
//! discarded when the query completes.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::trace;

use crate::domain::{Node, NodeKind, TypedRole, edge_cost, straight_line};
use crate::network::NetworkSnapshot;

/// Index of a materialized node within a query's arena.
pub(crate) type NodeId = usize;

/// Per-query node arena.
///
/// Each name is materialized at most once: the node a search first reaches
/// is the node every later step sees.
pub(crate) struct Arena<'a> {
    snapshot: &'a NetworkSnapshot,
    nodes: Vec<Node>,
    ids: HashMap<String, NodeId>,
}

impl<'a> Arena<'a> {
    fn new(snapshot: &'a NetworkSnapshot) -> Self {
        Self {
            snapshot,
            nodes: Vec::new(),
            ids: HashMap::new(),
        }
    }

    /// Materialize `name`, if the snapshot has a record for it.
    ///
    /// A line-segment node inherits the coordinates of the node it was
    /// first reached from, so a purely topological connector hop adds no
    /// spurious distance to either the search cost or the reported total.
    fn materialize(&mut self, name: &str, reached_from: Option<(f64, f64)>) -> Option<NodeId> {
        if let Some(&id) = self.ids.get(name) {
            return Some(id);
        }

        let mut node = self.snapshot.node(name)?;
        if let (Some(pos), NodeKind::Typed { role: TypedRole::Line, .. }) = (reached_from, &node.kind)
        {
            node.x = pos.0;
            node.z = pos.1;
        }

        let id = self.nodes.len();
        self.ids.insert(node.name.clone(), id);
        self.nodes.push(node);
        Some(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

/// A goal-reaching search: the arena and the parent chain over it.
pub(crate) struct SearchTree<'a> {
    pub arena: Arena<'a>,
    pub parents: HashMap<NodeId, NodeId>,
    pub start: NodeId,
    pub goal: NodeId,
}

/// Outcome of one search.
pub(crate) enum SearchOutcome<'a> {
    /// Start and goal are the same node.
    Trivial,
    /// Open set exhausted without reaching the goal.
    Exhausted,
    /// Goal reached; the parent chain is ready for reconstruction.
    Reached(SearchTree<'a>),
}

/// Open-set entry: min-f first, earliest inserted on ties.
struct OpenEntry {
    f: f64,
    seq: u64,
    id: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run A* between two canonical node names.
///
/// The heuristic is straight-line start→node plus node→goal. Against the
/// blended edge cost this is not strictly admissible; downstream distance
/// semantics depend on the resulting route shapes, so it is preserved
/// as-is.
pub(crate) fn search<'a>(
    snapshot: &'a NetworkSnapshot,
    start_name: &str,
    goal_name: &str,
) -> SearchOutcome<'a> {
    if start_name == goal_name {
        return SearchOutcome::Trivial;
    }

    let mut arena = Arena::new(snapshot);
    let Some(start) = arena.materialize(start_name, None) else {
        return SearchOutcome::Exhausted;
    };
    let Some(goal) = arena.materialize(goal_name, None) else {
        return SearchOutcome::Exhausted;
    };

    let start_pos = arena.node(start).pos();
    let goal_pos = arena.node(goal).pos();
    let heuristic =
        |pos: (f64, f64)| straight_line(start_pos, pos) + straight_line(pos, goal_pos);

    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<NodeId, f64> = HashMap::new();
    let mut closed: HashSet<NodeId> = HashSet::new();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut seq: u64 = 0;

    g_score.insert(start, 0.0);
    open.push(OpenEntry {
        f: heuristic(start_pos),
        seq,
        id: start,
    });

    while let Some(entry) = open.pop() {
        // A node re-queued with a better cost leaves its old entry behind;
        // the improved entry always pops first, so anything already closed
        // is stale.
        if !closed.insert(entry.id) {
            continue;
        }

        if entry.id == goal {
            trace!(expanded = closed.len(), "goal reached");
            return SearchOutcome::Reached(SearchTree {
                arena,
                parents,
                start,
                goal,
            });
        }

        let current = arena.node(entry.id).clone();
        if current.is_terminus && entry.id != start {
            // Terminus nodes are valid only as endpoints.
            continue;
        }

        let current_g = g_score.get(&entry.id).copied().unwrap_or(0.0);
        for link in &current.links {
            if current.forbids(link) {
                continue;
            }
            let Some(next) = arena.materialize(link, Some(current.pos())) else {
                continue;
            };
            if closed.contains(&next) {
                continue;
            }

            let next_pos = arena.node(next).pos();
            let tentative = current_g + edge_cost(current.pos(), next_pos);
            if g_score.get(&next).is_some_and(|&g| tentative >= g) {
                continue;
            }

            parents.insert(next, entry.id);
            g_score.insert(next, tentative);
            seq += 1;
            open.push(OpenEntry {
                f: tentative + heuristic(next_pos),
                seq,
                id: next,
            });
        }
    }

    SearchOutcome::Exhausted
}
