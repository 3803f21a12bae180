//! Weighted complexity scoring.
//!
//! # Overview
//!
//! Each candidate's complexity is a weighted sum of four normalized
//! factors: transitive dependency count, integration diversity,
//! dependency depth, and interaction volume. Factors are normalized to
//! `0.0..=1.0` against the maxima observed across the candidate batch
//! (a [`ScoringContext`]), so scores from one analysis run are directly
//! comparable to each other, not across runs with different inputs.
//!
//! Scoring is pure: no I/O, no shared state. Given the same model,
//! context, and weights, the score is identical every time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::classify::IntegrationCategory;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Relative weight of each scoring factor.
///
/// All weights must be non-negative; validation happens at config load.
/// Setting a weight to zero removes that factor from the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    /// Weight of the transitive closure size factor.
    pub dependency_count: f64,
    /// Weight of the integration diversity factor.
    pub integration_diversity: f64,
    /// Weight of the maximum dependency depth factor.
    pub depth: f64,
    /// Weight of the declared interaction volume factor.
    pub interaction_volume: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            dependency_count: 1.0,
            integration_diversity: 1.0,
            depth: 0.5,
            interaction_volume: 0.25,
        }
    }
}

impl ScoreWeights {
    /// True when every factor is weighted at zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dependency_count == 0.0
            && self.integration_diversity == 0.0
            && self.depth == 0.0
            && self.interaction_volume == 0.0
    }
}

// ---------------------------------------------------------------------------
// Batch context
// ---------------------------------------------------------------------------

/// Maxima observed across one candidate batch, used as normalization
/// denominators. A zero maximum means the factor contributes zero for
/// every candidate (no division by zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringContext {
    /// Largest transitive closure size in the batch.
    pub max_closure_size: usize,
    /// Deepest dependency chain in the batch.
    pub max_depth: usize,
    /// Highest declared interaction count in the batch.
    pub max_interaction_volume: usize,
}

impl ScoringContext {
    /// Folds one candidate's raw measurements into the batch maxima.
    pub fn observe(&mut self, closure_size: usize, depth: usize, interaction_volume: usize) {
        self.max_closure_size = self.max_closure_size.max(closure_size);
        self.max_depth = self.max_depth.max(depth);
        self.max_interaction_volume = self.max_interaction_volume.max(interaction_volume);
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Per-factor normalized values, retained so reports can explain a
/// score instead of presenting a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Normalized transitive closure size.
    pub dependency_count: f64,
    /// Normalized count of distinct integration categories.
    pub integration_diversity: f64,
    /// Normalized maximum dependency depth.
    pub depth: f64,
    /// Normalized declared interaction count.
    pub interaction_volume: f64,
}

/// A composite complexity score with its factor breakdown.
///
/// Lower is simpler. Scores order candidates within one analysis run;
/// they are not meaningful across runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityScore {
    /// The weighted composite.
    pub value: f64,
    /// The normalized factors behind it.
    pub breakdown: ScoreBreakdown,
}

/// Raw per-candidate measurements, gathered by the analysis pass before
/// normalization.
#[derive(Debug, Clone)]
pub struct CandidateMeasure {
    /// Size of the candidate's transitive closure.
    pub closure_size: usize,
    /// Distinct integration categories across the candidate and its
    /// closure members.
    pub categories: BTreeSet<IntegrationCategory>,
    /// Maximum shortest-path depth within the closure.
    pub depth: usize,
    /// The candidate's own declared interaction count.
    pub interaction_volume: usize,
}

/// Scores one candidate against the batch context.
#[must_use]
pub fn score(
    measure: &CandidateMeasure,
    context: &ScoringContext,
    weights: &ScoreWeights,
) -> ComplexityScore {
    let breakdown = ScoreBreakdown {
        dependency_count: normalize(measure.closure_size, context.max_closure_size),
        integration_diversity: normalize(measure.categories.len(), IntegrationCategory::ALL.len()),
        depth: normalize(measure.depth, context.max_depth),
        interaction_volume: normalize(measure.interaction_volume, context.max_interaction_volume),
    };
    let value = weights.dependency_count * breakdown.dependency_count
        + weights.integration_diversity * breakdown.integration_diversity
        + weights.depth * breakdown.depth
        + weights.interaction_volume * breakdown.interaction_volume;
    ComplexityScore { value, breakdown }
}

#[allow(clippy::cast_precision_loss)]
fn normalize(value: usize, max: usize) -> f64 {
    if max == 0 {
        0.0
    } else {
        value as f64 / max as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
