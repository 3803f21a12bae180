//! Summary statistics for a loaded dependency graph.
//!
//! Reported alongside analysis results so callers can see the shape of
//! the system they asked about: how big it is, how tangled it is, and
//! how much of it was never actually extracted.

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::visit::IntoNodeIdentifiers;
use serde::Serialize;

use crate::graph::build::GraphModel;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Shape summary of one loaded dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Declared components.
    pub component_count: usize,
    /// Unresolved external references kept as nodes.
    pub external_count: usize,
    /// Directed edges (typed dependencies).
    pub edge_count: usize,
    /// `edge_count / (n * (n - 1))` over all nodes; 0.0 below two nodes.
    pub density: f64,
    /// Strongly connected components with more than one member, plus
    /// self-loops. These are the dependency cycles in the graph.
    pub cycle_count: usize,
    /// Nodes with no edges in either direction.
    pub isolated_node_count: usize,
    /// Highest in-degree over all nodes.
    pub max_in_degree: usize,
    /// Highest out-degree over all nodes.
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a loaded model.
    #[must_use]
    pub fn from_model(model: &GraphModel) -> Self {
        let graph = &model.graph;
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let cycle_count = tarjan_scc(graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&node| graph.find_edge(node, node).is_some())
            })
            .count();

        let isolated_node_count = graph
            .node_identifiers()
            .filter(|&idx| {
                graph.neighbors_directed(idx, Direction::Incoming).next().is_none()
                    && graph.neighbors_directed(idx, Direction::Outgoing).next().is_none()
            })
            .count();

        let max_in_degree = graph
            .node_identifiers()
            .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
            .max()
            .unwrap_or(0);
        let max_out_degree = graph
            .node_identifiers()
            .map(|idx| graph.neighbors_directed(idx, Direction::Outgoing).count())
            .max()
            .unwrap_or(0);

        Self {
            component_count: model.component_count(),
            external_count: model.external_count(),
            edge_count,
            density: compute_density(node_count, edge_count),
            cycle_count,
            isolated_node_count,
            max_in_degree,
            max_out_degree,
        }
    }

    /// Whether the graph contains at least one dependency cycle.
    #[must_use]
    pub const fn has_cycles(&self) -> bool {
        self.cycle_count > 0
    }
}

impl GraphModel {
    /// Compute summary statistics for this model.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats::from_model(self)
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
