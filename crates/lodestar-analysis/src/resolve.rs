//! Transitive dependency resolution.
//!
//! # Overview
//!
//! Iterative breadth-first traversal over the dependency graph with an
//! explicit visited set, cycle-safe and immune to recursion depth
//! regardless of how tangled the extract is. The starting component is
//! never a member of its own closure, even when a cycle routes back to
//! it: for `A → B → C → A`, `closure(A)` is `{B, C}`.
//!
//! [`closure_with_depth`] additionally reports the shortest edge-count
//! distance to each reachable identifier, which the scoring engine uses
//! to weight near versus deep dependencies.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use lodestar_core::GraphModel;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from resolution requests.
///
/// Fatal only for the request that raised them; the shared model is
/// untouched and other concurrent requests are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The requested identifier is not a declared component of the
    /// analyzed model. External (dangling-reference) nodes are not
    /// valid starting points either, since they have no declared
    /// interactions to resolve.
    #[error("unknown component: {name}")]
    UnknownComponent {
        /// The identifier that was requested.
        name: String,
    },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The transitive closure of `name`: every identifier reachable over
/// outgoing edges, `name` itself excluded.
///
/// `max_depth` bounds traversal depth when provided (`Some(1)` is the
/// direct dependencies); `None` walks the full closure.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownComponent`] if `name` is not a
/// declared component.
pub fn closure(
    model: &GraphModel,
    name: &str,
    max_depth: Option<usize>,
) -> Result<BTreeSet<String>, ResolveError> {
    Ok(closure_with_depth(model, name, max_depth)?
        .into_keys()
        .collect())
}

/// Like [`closure`], but maps each reachable identifier to its shortest
/// edge-count distance from `name` (direct dependencies are at depth 1).
///
/// # Errors
///
/// Returns [`ResolveError::UnknownComponent`] if `name` is not a
/// declared component.
pub fn closure_with_depth(
    model: &GraphModel,
    name: &str,
    max_depth: Option<usize>,
) -> Result<BTreeMap<String, usize>, ResolveError> {
    let start = declared_index(model, name)?;
    Ok(bfs_depths(model, start, Direction::Outgoing, max_depth))
}

/// The reverse closure of `name`: every identifier that depends on it,
/// directly or transitively. Used for impact framing.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownComponent`] if `name` is not a
/// declared component.
pub fn dependents(model: &GraphModel, name: &str) -> Result<BTreeSet<String>, ResolveError> {
    let start = declared_index(model, name)?;
    Ok(bfs_depths(model, start, Direction::Incoming, None)
        .into_keys()
        .collect())
}

fn declared_index(model: &GraphModel, name: &str) -> Result<NodeIndex, ResolveError> {
    if !model.contains(name) {
        return Err(ResolveError::UnknownComponent {
            name: name.to_string(),
        });
    }
    model
        .node_index(name)
        .ok_or_else(|| ResolveError::UnknownComponent {
            name: name.to_string(),
        })
}

/// Shared BFS: shortest distances from `start`, start excluded from the
/// result, visited set guarding against cycles.
pub(crate) fn bfs_depths(
    model: &GraphModel,
    start: NodeIndex,
    direction: Direction,
    max_depth: Option<usize>,
) -> BTreeMap<String, usize> {
    let mut depths: BTreeMap<String, usize> = BTreeMap::new();
    let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(start, 0)]);

    while let Some((current, depth)) = queue.pop_front() {
        if max_depth.is_some_and(|limit| depth >= limit) {
            continue;
        }
        for neighbor in model.graph.neighbors_directed(current, direction) {
            if visited.insert(neighbor) {
                if let Some(neighbor_name) = model.name_of(neighbor) {
                    depths.insert(neighbor_name.to_string(), depth + 1);
                }
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    depths
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
