//! Graph construction from parsed ATX component records.
//!
//! # Overview
//!
//! [`GraphModel::load`] turns a list of [`Component`] records into a
//! [`petgraph`] directed graph suitable for the downstream analysis
//! stages (classification, transitive resolution, scoring, risk).
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A depends on B": A declares an interaction
//! whose resolved direction points at B. Inbound descriptors flip the
//! edge.
//!
//! ## Dangling References
//!
//! Partially extracted systems routinely reference components that were
//! never declared. Those targets are kept as *external* nodes and each
//! occurrence is recorded as a [`Warning::DanglingEdge`]; dropping them
//! silently would hide exactly the references that drive missing-component
//! risk.
//!
//! ## Fingerprint
//!
//! The model carries a BLAKE3 hash of the sorted edge set
//! (`blake3:<hex>`). Reports echo it so a result can be tied to the
//! exact graph it was computed from.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::Direction as PetDirection;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument, warn};

use crate::error::{GraphError, Warning};
use crate::model::{Component, Direction, InteractionKind};

// ---------------------------------------------------------------------------
// GraphModel
// ---------------------------------------------------------------------------

/// The loaded dependency graph for one analysis request.
///
/// Nodes are component identifiers; edge weights are interaction kinds.
/// Identifier lookup is O(1) through `node_map`. The graph may contain
/// cycles; nothing here assumes a DAG.
#[derive(Debug)]
pub struct GraphModel {
    /// Directed graph: nodes = identifiers, edges = typed dependencies.
    pub graph: DiGraph<String, InteractionKind>,
    /// Mapping from identifier to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    components: HashMap<String, Component>,
    externals: HashSet<String>,
    warnings: Vec<Warning>,
    fingerprint: String,
}

impl GraphModel {
    /// Build a model from parsed component records.
    ///
    /// Self-edges are dropped with a warning; duplicate declarations
    /// keep the first record; edges to undeclared names are kept and the
    /// target is marked external.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyName`] or [`GraphError::EmptyTarget`]
    /// for structurally invalid records. No partial model is produced.
    #[instrument(skip(records), fields(records = records.len()))]
    pub fn load(records: Vec<Component>) -> Result<Self, GraphError> {
        for (index, record) in records.iter().enumerate() {
            if record.name.is_empty() {
                return Err(GraphError::EmptyName { index });
            }
            if record.interactions.iter().any(|i| i.target.is_empty()) {
                return Err(GraphError::EmptyTarget {
                    component: record.name.clone(),
                });
            }
        }

        let mut graph = DiGraph::<String, InteractionKind>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(records.len());
        let mut components: HashMap<String, Component> = HashMap::with_capacity(records.len());
        let mut warnings: Vec<Warning> = Vec::new();

        // Pass 1: declared components become nodes.
        for record in records {
            if components.contains_key(&record.name) {
                warn!(name = %record.name, "duplicate component declaration; first wins");
                warnings.push(Warning::DuplicateComponent {
                    name: record.name.clone(),
                });
                continue;
            }
            let idx = graph.add_node(record.name.clone());
            node_map.insert(record.name.clone(), idx);
            components.insert(record.name.clone(), record);
        }

        // Pass 2: interactions become edges. Undeclared endpoints are
        // added as external nodes so traversal still sees them. Sorted
        // iteration keeps the warning order deterministic.
        let mut externals: HashSet<String> = HashSet::new();
        let mut edges: Vec<(String, String, InteractionKind)> = Vec::new();

        let mut declared: Vec<&Component> = components.values().collect();
        declared.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        for component in declared {
            for interaction in &component.interactions {
                let (source, target) = match interaction.direction {
                    Direction::Outbound => (component.name.clone(), interaction.target.clone()),
                    Direction::Inbound => (interaction.target.clone(), component.name.clone()),
                };

                if source == target {
                    warn!(name = %source, "self-edge dropped");
                    warnings.push(Warning::SelfEdge { name: source });
                    continue;
                }

                if !components.contains_key(&interaction.target) {
                    externals.insert(interaction.target.clone());
                    warnings.push(Warning::DanglingEdge {
                        source: component.name.clone(),
                        target: interaction.target.clone(),
                        kind: interaction.kind,
                    });
                }

                edges.push((source, target, interaction.kind));
            }
        }

        // Deterministic edge order: fingerprint and duplicate suppression
        // must not depend on HashMap iteration order.
        edges.sort_unstable();
        edges.dedup();
        let fingerprint = compute_edge_fingerprint(&edges);

        for (source, target, kind) in edges {
            let source_idx = *node_map
                .entry(source.clone())
                .or_insert_with(|| graph.add_node(source));
            let target_idx = *node_map
                .entry(target.clone())
                .or_insert_with(|| graph.add_node(target));
            graph.add_edge(source_idx, target_idx, kind);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            externals = externals.len(),
            warnings = warnings.len(),
            "dependency graph loaded"
        );

        Ok(Self {
            graph,
            node_map,
            components,
            externals,
            warnings,
            fingerprint,
        })
    }

    /// Parse an ATX dependency-graph JSON document and load it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`] for malformed JSON or unknown
    /// interaction kinds, plus any structural error from [`Self::load`].
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let records: Vec<Component> = serde_json::from_str(json)?;
        Self::load(records)
    }

    /// Iterate over all declared components in unspecified order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Sorted identifiers of all declared components.
    #[must_use]
    pub fn component_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a declared component by identifier. O(1).
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Whether `name` is a declared component (externals excluded).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Whether `name` appears in the graph only as an unresolved
    /// external reference.
    #[must_use]
    pub fn is_external(&self, name: &str) -> bool {
        self.externals.contains(name)
    }

    /// Number of declared components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of external (undeclared) nodes.
    #[must_use]
    pub fn external_count(&self) -> usize {
        self.externals.len()
    }

    /// Look up the `NodeIndex` for an identifier (declared or external).
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// The identifier label for a node.
    #[must_use]
    pub fn name_of(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Outgoing edges of `name` as `(target, kind)` pairs, sorted for
    /// deterministic output. Empty for unknown identifiers.
    #[must_use]
    pub fn edges_from(&self, name: &str) -> Vec<(&str, InteractionKind)> {
        self.typed_neighbors(name, PetDirection::Outgoing)
    }

    /// Incoming edges of `name` as `(source, kind)` pairs, sorted.
    /// Empty for unknown identifiers.
    #[must_use]
    pub fn edges_to(&self, name: &str) -> Vec<(&str, InteractionKind)> {
        self.typed_neighbors(name, PetDirection::Incoming)
    }

    /// Recoverable defects found during load.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// BLAKE3 content hash of the sorted edge set (`blake3:<hex>`).
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    fn typed_neighbors(
        &self,
        name: &str,
        direction: PetDirection,
    ) -> Vec<(&str, InteractionKind)> {
        let Some(idx) = self.node_index(name) else {
            return Vec::new();
        };
        let mut pairs: Vec<(&str, InteractionKind)> = self
            .graph
            .edges_directed(idx, direction)
            .filter_map(|edge| {
                let other = match direction {
                    PetDirection::Outgoing => edge.target(),
                    PetDirection::Incoming => edge.source(),
                };
                self.name_of(other).map(|n| (n, *edge.weight()))
            })
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

/// BLAKE3 hash of the sorted `(source, target, kind)` triples.
fn compute_edge_fingerprint(edges: &[(String, String, InteractionKind)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for (source, target, kind) in edges {
        hasher.update(source.as_bytes());
        hasher.update(b"\x00");
        hasher.update(target.as_bytes());
        hasher.update(b"\x00");
        hasher.update(kind.as_str().as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
