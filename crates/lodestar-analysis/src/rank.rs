//! Candidate ranking.
//!
//! Orders scored candidates simplest-first: ascending complexity score,
//! then ascending risk severity, then name. The name tiebreaker makes
//! the ordering total, so ranking the same batch twice yields the same
//! list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::classify::IntegrationCategory;
use crate::risk::Severity;
use crate::score::ScoreBreakdown;

/// One row of the modernization ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// The candidate's identifier.
    pub name: String,
    /// The candidate's declared component type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Integration categories across the candidate and its closure.
    pub categories: BTreeSet<IntegrationCategory>,
    /// Size of the candidate's transitive closure.
    pub closure_size: usize,
    /// The weighted complexity score (lower is simpler).
    pub score: f64,
    /// Normalized per-factor values behind the score.
    pub breakdown: ScoreBreakdown,
    /// Missing-component risk severity.
    pub severity: Severity,
}

/// Sorts candidates simplest-first and assigns 1-based ranks.
///
/// Score ties break on severity (safer first), then on name.
#[must_use]
pub fn rank(mut candidates: Vec<RankedCandidate>) -> Vec<RankedCandidate> {
    candidates.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| a.severity.cmp(&b.severity))
            .then_with(|| a.name.cmp(&b.name))
    });
    for (position, candidate) in candidates.iter_mut().enumerate() {
        candidate.rank = position + 1;
    }
    candidates
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
