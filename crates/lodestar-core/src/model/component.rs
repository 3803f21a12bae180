//! Component and interaction descriptors.
//!
//! A [`Component`] is one entry of the extracted dependency graph: a
//! unique identifier, a free-form type tag (`JCL`, `COB`, `CPY`,
//! `TRANSACTION`, …), and an ordered list of declared interactions.
//! Components are immutable after load.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InteractionKind
// ---------------------------------------------------------------------------

/// The kind of a declared interaction.
///
/// Multiple edges between the same pair of components with different
/// kinds are permitted and semantically distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    /// Program call or job-step execution.
    Calls,
    /// Data read (dataset, table, file).
    Reads,
    /// Data write.
    Writes,
    /// Invocation of a system outside the extracted universe.
    InvokesExternal,
    /// Copybook / record-layout inclusion.
    Includes,
}

impl InteractionKind {
    /// Stable kebab-case name, matching the wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calls => "calls",
            Self::Reads => "reads",
            Self::Writes => "writes",
            Self::InvokesExternal => "invokes-external",
            Self::Includes => "includes",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction of a declared interaction relative to the declaring
/// component.
///
/// `Outbound` (the default, and the overwhelmingly common case in ATX
/// extracts) produces an edge `declarer → target`; `Inbound` produces
/// `target → declarer`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// The declaring component acts on the target.
    #[default]
    Outbound,
    /// The target acts on the declaring component.
    Inbound,
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

/// One declared interaction descriptor on a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Identifier of the other side of the interaction.
    #[serde(alias = "name")]
    pub target: String,
    /// Interaction kind.
    pub kind: InteractionKind,
    /// Direction relative to the declaring component.
    #[serde(default)]
    pub direction: Direction,
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// One component of the extracted system.
///
/// `kind` is the declared ATX type tag and is deliberately a free-form
/// string: extraction tooling emits an open-ended vocabulary (`JCL`,
/// `PROC`, `COB`, `CPY`, `BMS`, `TRANSACTION`, `VSAM KSDS DATASET`, …)
/// and the classifier matches on it with patterns rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Unique identifier (program/module/job name).
    pub name: String,
    /// Declared ATX type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Ordered declared interactions.
    #[serde(default, alias = "dependencies")]
    pub interactions: Vec<Interaction>,
}

impl Component {
    /// Number of declared outgoing interaction descriptors.
    ///
    /// This is the raw interaction volume used by the scoring engine;
    /// inbound descriptors are excluded since they describe someone
    /// else's activity.
    #[must_use]
    pub fn outgoing_count(&self) -> usize {
        self.interactions
            .iter()
            .filter(|i| i.direction == Direction::Outbound)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_kind_round_trips_kebab_case() {
        let kind: InteractionKind =
            serde_json::from_str("\"invokes-external\"").expect("parse kind");
        assert_eq!(kind, InteractionKind::InvokesExternal);
        assert_eq!(
            serde_json::to_string(&kind).expect("serialize"),
            "\"invokes-external\""
        );
    }

    #[test]
    fn unknown_interaction_kind_is_rejected() {
        let result: Result<InteractionKind, _> = serde_json::from_str("\"teleports\"");
        assert!(result.is_err(), "unknown kinds must not deserialize");
    }

    #[test]
    fn component_accepts_atx_field_names() {
        // ATX extracts use `type` and `dependencies` with `name` targets.
        let json = r#"{
            "name": "PAYROLL",
            "type": "COB",
            "dependencies": [
                {"name": "TAXCALC", "kind": "calls"},
                {"name": "DB2.EMPTABLE", "kind": "reads"}
            ]
        }"#;
        let c: Component = serde_json::from_str(json).expect("parse component");
        assert_eq!(c.name, "PAYROLL");
        assert_eq!(c.kind, "COB");
        assert_eq!(c.interactions.len(), 2);
        assert_eq!(c.interactions[0].target, "TAXCALC");
        assert_eq!(c.interactions[0].direction, Direction::Outbound);
    }

    #[test]
    fn outgoing_count_skips_inbound_descriptors() {
        let c = Component {
            name: "A".to_string(),
            kind: "COB".to_string(),
            interactions: vec![
                Interaction {
                    target: "B".to_string(),
                    kind: InteractionKind::Calls,
                    direction: Direction::Outbound,
                },
                Interaction {
                    target: "C".to_string(),
                    kind: InteractionKind::Calls,
                    direction: Direction::Inbound,
                },
            ],
        };
        assert_eq!(c.outgoing_count(), 1);
    }
}
