//! Path reconstruction: parent chains into rider-facing tokens.
//!
//! The walk runs goal→start over the search tree, emitting tokens per the
//! network's rules, then deduplicates consecutive repeats and reverses the
//! sequence into travel order. Total distance is the running sum of
//! per-edge blended costs over the chain, independent of which tokens are
//! emitted.

use crate::domain::{NodeKind, Route, TypedRole, edge_cost};

use super::astar::{NodeId, SearchTree};

/// Rebuild the simple-network route from a goal-reaching search tree.
///
/// Each node emits its own name, unless it is a bad-link target of its
/// parent, in which case the parent's override display name is emitted
/// instead. A goal the rider could ride through gets an exit marker.
/// Multi-word tokens are split into individual instruction words.
pub(crate) fn reconstruct_simple(tree: &SearchTree<'_>) -> Route {
    let mut tokens = Vec::new();
    let mut distance = 0.0;

    let goal = tree.arena.node(tree.goal);
    if !goal.is_terminus {
        tokens.push(format!("{}:exit", goal.name));
    }

    let mut id = tree.goal;
    while id != tree.start {
        let Some(&parent) = tree.parents.get(&id) else {
            break;
        };
        let node = tree.arena.node(id);
        let parent_node = tree.arena.node(parent);
        distance += edge_cost(node.pos(), parent_node.pos());

        let token = parent_node.bad_link(&node.name).unwrap_or(&node.name);
        tokens.push(token.to_string());

        id = parent;
    }
    tokens.push(tree.arena.node(tree.start).name.clone());

    let mut tokens = split_words(tokens);
    tokens.dedup();
    tokens.reverse();

    Route { tokens, distance }
}

/// Rebuild the typed-network route from a goal-reaching search tree.
pub(crate) fn reconstruct_typed(tree: &SearchTree<'_>) -> Route {
    let mut tokens = Vec::new();
    let mut distance = 0.0;

    let goal = tree.arena.node(tree.goal);
    if goal.role() == Some(TypedRole::JunctionStop) {
        if let NodeKind::Typed { dest_stop, .. } = &goal.kind {
            tokens.push(dest_stop.clone());
        }
    }

    let mut previous: Option<NodeId> = None;
    let mut id = tree.goal;
    while id != tree.start {
        let Some(&parent) = tree.parents.get(&id) else {
            break;
        };
        let node = tree.arena.node(id);
        let parent_node = tree.arena.node(parent);
        distance += edge_cost(node.pos(), parent_node.pos());

        if let NodeKind::Typed {
            role,
            dest,
            dest_a,
            dest_b,
            dest_junction,
            ..
        } = &node.kind
        {
            match role {
                TypedRole::Line => {
                    // Direction along the segment: where the walk entered
                    // versus left this line within its own link order.
                    let entered = position_of(&node.links, &parent_node.name);
                    let left = previous
                        .and_then(|p| position_of(&node.links, &tree.arena.node(p).name));
                    match (entered, left) {
                        (Some(s), Some(e)) if s < e => tokens.push(dest_b.clone()),
                        _ => tokens.push(dest_a.clone()),
                    }
                }
                TypedRole::StopJunction if id != tree.goal => {
                    tokens.push(dest_junction.clone());
                    tokens.push(dest.clone());
                }
                TypedRole::Crossing => {}
                _ => match parent_node.bad_link(&node.name) {
                    Some(name) => tokens.push(name.to_string()),
                    None => tokens.push(dest.clone()),
                },
            }
        }

        previous = Some(id);
        id = parent;
    }

    // Boarding the system from the start node: its entry token for the
    // neighbor the route leaves through.
    let start = tree.arena.node(tree.start);
    if let (NodeKind::Typed { link_dests, .. }, Some(prev)) = (&start.kind, previous) {
        if let Some(entry) = link_dests.get(&tree.arena.node(prev).name) {
            if !entry.is_empty() {
                tokens.push(entry.clone());
            }
        }
    }

    tokens.dedup();
    tokens.reverse();

    Route { tokens, distance }
}

/// Split multi-word tokens into sub-words, pushed in reverse order so the
/// final reversal restores rider word order.
fn split_words(tokens: Vec<String>) -> Vec<String> {
    let mut out = Vec::new();
    for token in tokens {
        for word in token.split(' ').rev() {
            out.push(word.to_string());
        }
    }
    out
}

fn position_of(links: &[String], name: &str) -> Option<usize> {
    links.iter().position(|l| l == name)
}
