//! Missing-component risk assessment.
//!
//! # Overview
//!
//! Cross-references a candidate's transitive closure against the
//! missing-component dataset and grades the exposure. The headline
//! number is the missing ratio (missing closure members over total
//! closure members); severity tiers come from configurable thresholds,
//! with one override: a missing *direct* dependency is always High,
//! because the candidate cannot run without it no matter how small the
//! ratio is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use lodestar_core::MissingSet;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Risk severity tiers, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Nothing in the closure is missing.
    #[default]
    None,
    /// Some closure members are missing, below the medium threshold.
    Low,
    /// The missing ratio reached the medium threshold.
    Medium,
    /// The missing ratio reached the high threshold, or a direct
    /// dependency is missing.
    High,
}

impl Severity {
    /// Stable lowercase label, matching the serde form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Ratio thresholds for the severity tiers. Inclusive at the top: a
/// ratio exactly at `high` grades High.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskThresholds {
    /// Missing ratio at or above which severity is Medium.
    pub medium: f64,
    /// Missing ratio at or above which severity is High.
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 0.3,
            high: 0.5,
        }
    }
}

impl RiskThresholds {
    /// Grades a missing ratio into a tier.
    #[must_use]
    pub fn grade(&self, ratio: f64) -> Severity {
        if ratio >= self.high {
            Severity::High
        } else if ratio >= self.medium {
            Severity::Medium
        } else if ratio > 0.0 {
            Severity::Low
        } else {
            Severity::None
        }
    }
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

/// How a missing dependency relates to the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    /// One edge away from the candidate.
    Direct,
    /// Reached through at least one intermediate component.
    Transitive,
}

/// One missing member of a candidate's closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDependency {
    /// The missing component's identifier.
    pub name: String,
    /// Its component type, from the missing-component dataset.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the candidate depends on it directly or transitively.
    pub relationship: Relationship,
}

/// The risk grade for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// The candidate's identifier.
    pub name: String,
    /// The missing closure members, nearest first, then by name.
    pub missing: Vec<MissingDependency>,
    /// Missing closure members over total closure members. Zero for an
    /// empty closure.
    pub missing_ratio: f64,
    /// The graded severity.
    pub severity: Severity,
    /// True when at least one direct dependency is missing.
    pub directly_missing: bool,
}

impl RiskAssessment {
    /// True when nothing in the closure is missing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.severity == Severity::None
    }
}

/// Grades one candidate from its depth-annotated closure.
///
/// `closure` maps each reachable identifier to its shortest edge-count
/// distance, as produced by
/// [`closure_with_depth`](crate::resolve::closure_with_depth).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn assess(
    missing_set: &MissingSet,
    thresholds: &RiskThresholds,
    name: &str,
    closure: &BTreeMap<String, usize>,
) -> RiskAssessment {
    let mut found: Vec<(usize, MissingDependency)> = closure
        .iter()
        .filter_map(|(member, &depth)| {
            let record = missing_set.get(member)?;
            Some((
                depth,
                MissingDependency {
                    name: member.clone(),
                    kind: record.kind.clone(),
                    relationship: if depth == 1 {
                        Relationship::Direct
                    } else {
                        Relationship::Transitive
                    },
                },
            ))
        })
        .collect();
    found.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| a.name.cmp(&b.name)));
    let missing: Vec<MissingDependency> = found.into_iter().map(|(_, dep)| dep).collect();

    let missing_ratio = if closure.is_empty() {
        0.0
    } else {
        missing.len() as f64 / closure.len() as f64
    };
    let directly_missing = missing
        .iter()
        .any(|dep| dep.relationship == Relationship::Direct);

    // A candidate that is itself in the missing dataset was never fully
    // extracted; nothing about it can be trusted.
    let self_missing = missing_set.contains(name);
    let severity = if directly_missing || self_missing {
        Severity::High
    } else {
        thresholds.grade(missing_ratio)
    };

    if severity > Severity::None {
        debug!(
            candidate = name,
            missing = missing.len(),
            ratio = missing_ratio,
            %severity,
            "missing dependencies found"
        );
    }

    RiskAssessment {
        name: name.to_string(),
        missing,
        missing_ratio,
        severity,
        directly_missing,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
