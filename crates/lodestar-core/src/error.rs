//! Error and warning taxonomy for graph loading.
//!
//! Fatal conditions (structurally invalid input) are [`GraphError`]s and
//! abort the load with no partial model. Recoverable conditions (edges
//! that reference identifiers never declared as components, or
//! self-edges) become [`Warning`]s: the load continues, the defect is
//! logged, and the warnings ride along on the model so callers can
//! surface them next to results.

use std::fmt;

use serde::Serialize;

use crate::model::InteractionKind;

// ---------------------------------------------------------------------------
// Fatal errors
// ---------------------------------------------------------------------------

/// Fatal errors raised while loading a dependency graph.
///
/// Any of these means the input is unusable; no partial [`crate::GraphModel`]
/// is produced.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The raw input could not be deserialized (malformed JSON, missing
    /// required fields, unrecognized interaction kinds).
    #[error("malformed dependency graph: {0}")]
    Parse(#[from] serde_json::Error),

    /// A component record has an empty identifier.
    #[error("component at index {index} has an empty name")]
    EmptyName {
        /// Zero-based position of the offending record in the input.
        index: usize,
    },

    /// An interaction descriptor has an empty target identifier.
    #[error("component {component} declares an interaction with an empty target")]
    EmptyTarget {
        /// The component whose interaction list is defective.
        component: String,
    },
}

// ---------------------------------------------------------------------------
// Recoverable warnings
// ---------------------------------------------------------------------------

/// A recoverable defect found while loading the graph.
///
/// Warnings never fail the load. Dangling references are common in
/// partially extracted systems, so they are treated as unresolved
/// externals and reported rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "kebab-case")]
pub enum Warning {
    /// An edge references a target never declared as a component. The
    /// target is kept in the graph as an external node.
    DanglingEdge {
        /// Declared component the edge originates from.
        source: String,
        /// Undeclared identifier the edge points at.
        target: String,
        /// Interaction kind on the edge.
        kind: InteractionKind,
    },
    /// A component declares an interaction with itself; the edge is
    /// dropped.
    SelfEdge {
        /// The component with the self-referential interaction.
        name: String,
    },
    /// The same component name was declared more than once; the first
    /// declaration wins.
    DuplicateComponent {
        /// The duplicated identifier.
        name: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingEdge {
                source,
                target,
                kind,
            } => write!(
                f,
                "edge {source} -[{kind}]-> {target} references an undeclared component; \
                 treating {target} as external"
            ),
            Self::SelfEdge { name } => write!(f, "self-edge on {name} dropped"),
            Self::DuplicateComponent { name } => {
                write!(f, "component {name} declared more than once; first wins")
            }
        }
    }
}
