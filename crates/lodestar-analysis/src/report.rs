//! The full analysis pass.
//!
//! # Overview
//!
//! [`Analysis::run`] ties the stages together: classify every declared
//! component, resolve each candidate's transitive closure (in parallel,
//! the closures are independent), score the batch, grade the
//! missing-component risk, and rank. The result is a plain serializable
//! value; rendering and transport are the caller's concern.
//!
//! The pass is read-only over the model and deterministic: every
//! collection in the output is sorted, and the model fingerprint is
//! carried so downstream consumers can tell which graph a report
//! describes.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

use lodestar_core::{GraphModel, GraphStats, MissingSet, Warning};

use crate::classify::{self, IntegrationCategory, RuleTable};
use crate::config::{AnalysisConfig, ConfigError};
use crate::rank::{self, RankedCandidate};
use crate::resolve::{self, ResolveError};
use crate::risk::{self, RiskAssessment, Severity};
use crate::score::{self, CandidateMeasure, ScoringContext};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The complete result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Content fingerprint of the analyzed graph's edge set.
    pub fingerprint: String,
    /// Structural statistics of the graph.
    pub stats: GraphStats,
    /// Input defects noted while the graph was loaded.
    pub warnings: Vec<Warning>,
    /// Declared components per integration category, names sorted.
    pub integration_breakdown: BTreeMap<IntegrationCategory, Vec<String>>,
    /// Candidates ordered simplest-first.
    pub ranked: Vec<RankedCandidate>,
    /// Risk assessment per candidate, keyed by identifier.
    pub risks: BTreeMap<String, RiskAssessment>,
    /// Missing components grouped by declared type.
    pub missing_by_type: BTreeMap<String, usize>,
    /// Declared components over declared plus missing. `1.0` when the
    /// missing dataset is empty.
    pub completeness: f64,
}

/// One row of a side-by-side candidate comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    /// The candidate's identifier.
    pub name: String,
    /// Position in the overall ranking.
    pub rank: usize,
    /// The weighted complexity score.
    pub score: f64,
    /// Missing-component risk severity.
    pub severity: Severity,
    /// Size of the transitive closure.
    pub closure_size: usize,
    /// Integration categories across the candidate and its closure.
    pub categories: BTreeSet<IntegrationCategory>,
    /// The full missing-dependency list.
    pub missing: Vec<risk::MissingDependency>,
}

// ---------------------------------------------------------------------------
// The pass
// ---------------------------------------------------------------------------

impl Analysis {
    /// Run the full pass over a loaded model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation;
    /// the model itself cannot fail an analysis.
    #[instrument(skip_all, fields(components = model.component_count(), missing = missing.len()))]
    pub fn run(
        model: &GraphModel,
        missing: &MissingSet,
        config: &AnalysisConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let categories_by_name = classify_all(model, &config.rules);

        // Closures are independent per candidate; resolve them in
        // parallel, then score sequentially against the batch maxima.
        let candidates: Vec<&lodestar_core::Component> = model
            .components()
            .filter(|c| config.is_entry_point_type(&c.kind))
            .collect();
        let closures: Vec<(&lodestar_core::Component, BTreeMap<String, usize>)> = candidates
            .par_iter()
            .filter_map(|component| {
                let start = model.node_index(&component.name)?;
                Some((
                    *component,
                    resolve::bfs_depths(model, start, petgraph::Direction::Outgoing, config.max_depth),
                ))
            })
            .collect();

        let mut context = ScoringContext::default();
        let measures: Vec<CandidateMeasure> = closures
            .iter()
            .map(|(component, closure)| {
                let mut categories = categories_by_name
                    .get(component.name.as_str())
                    .cloned()
                    .unwrap_or_default();
                for member in closure.keys() {
                    if let Some(member_categories) = categories_by_name.get(member.as_str()) {
                        categories.extend(member_categories.iter().copied());
                    }
                }
                let measure = CandidateMeasure {
                    closure_size: closure.len(),
                    categories,
                    depth: closure.values().copied().max().unwrap_or(0),
                    interaction_volume: component.outgoing_count(),
                };
                context.observe(measure.closure_size, measure.depth, measure.interaction_volume);
                measure
            })
            .collect();

        let mut risks: BTreeMap<String, RiskAssessment> = BTreeMap::new();
        let mut rows: Vec<RankedCandidate> = Vec::with_capacity(closures.len());
        for ((component, closure), measure) in closures.iter().zip(&measures) {
            let assessment = risk::assess(missing, &config.thresholds, &component.name, closure);
            let scored = score::score(measure, &context, &config.weights);
            rows.push(RankedCandidate {
                rank: 0,
                name: component.name.clone(),
                kind: component.kind.clone(),
                categories: measure.categories.clone(),
                closure_size: measure.closure_size,
                score: scored.value,
                breakdown: scored.breakdown,
                severity: assessment.severity,
            });
            risks.insert(component.name.clone(), assessment);
        }
        let ranked = rank::rank(rows);

        let analysis = Self {
            fingerprint: model.fingerprint().to_string(),
            stats: model.stats(),
            warnings: model.warnings().to_vec(),
            integration_breakdown: breakdown(&categories_by_name),
            ranked,
            risks,
            missing_by_type: missing.by_type(),
            completeness: completeness(model.component_count(), missing.len()),
        };
        info!(
            candidates = analysis.ranked.len(),
            at_risk = analysis.risk_report().len(),
            completeness = analysis.completeness,
            "analysis complete"
        );
        Ok(analysis)
    }

    /// Candidates with a non-`None` severity, worst first, then by
    /// missing ratio, then by name.
    #[must_use]
    pub fn risk_report(&self) -> Vec<&RiskAssessment> {
        let mut report: Vec<&RiskAssessment> = self
            .risks
            .values()
            .filter(|a| a.severity > Severity::None)
            .collect();
        report.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| b.missing_ratio.total_cmp(&a.missing_ratio))
                .then_with(|| a.name.cmp(&b.name))
        });
        report
    }

    /// Side-by-side comparison of named candidates, in ranking order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownComponent`] when a name was not
    /// among the ranked candidates.
    pub fn compare(&self, names: &[&str]) -> Result<Vec<ComparisonRow>, ResolveError> {
        let mut rows: Vec<ComparisonRow> = names
            .iter()
            .map(|&name| {
                let candidate = self
                    .ranked
                    .iter()
                    .find(|c| c.name == name)
                    .ok_or_else(|| ResolveError::UnknownComponent {
                        name: name.to_string(),
                    })?;
                let missing = self
                    .risks
                    .get(name)
                    .map(|a| a.missing.clone())
                    .unwrap_or_default();
                Ok(ComparisonRow {
                    name: candidate.name.clone(),
                    rank: candidate.rank,
                    score: candidate.score,
                    severity: candidate.severity,
                    closure_size: candidate.closure_size,
                    categories: candidate.categories.clone(),
                    missing,
                })
            })
            .collect::<Result<_, ResolveError>>()?;
        rows.sort_by_key(|row| row.rank);
        Ok(rows)
    }
}

fn classify_all(
    model: &GraphModel,
    table: &RuleTable,
) -> BTreeMap<String, BTreeSet<IntegrationCategory>> {
    model
        .components()
        .map(|component| {
            (
                component.name.clone(),
                classify::classify(component, model, table),
            )
        })
        .collect()
}

fn breakdown(
    categories_by_name: &BTreeMap<String, BTreeSet<IntegrationCategory>>,
) -> BTreeMap<IntegrationCategory, Vec<String>> {
    let mut by_category: BTreeMap<IntegrationCategory, Vec<String>> = BTreeMap::new();
    for (name, categories) in categories_by_name {
        for category in categories {
            by_category.entry(*category).or_default().push(name.clone());
        }
    }
    by_category
}

#[allow(clippy::cast_precision_loss)]
fn completeness(declared: usize, missing: usize) -> f64 {
    if declared + missing == 0 {
        1.0
    } else {
        declared as f64 / (declared + missing) as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
