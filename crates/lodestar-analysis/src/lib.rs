#![forbid(unsafe_code)]
//! lodestar-analysis library.
//!
//! The analysis engine on top of [`lodestar_core`]: rule-driven
//! integration classification, cycle-safe transitive resolution,
//! weighted complexity scoring, missing-component risk assessment, and
//! candidate ranking. [`report::Analysis`] ties the stages together into
//! one deterministic, side-effect-free pass over a loaded graph.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums per stage, propagated with `?`.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).
//! - **Purity**: every stage is a pure function of the model plus
//!   configuration. Same inputs, same outputs, no shared mutable state.

pub mod classify;
pub mod config;
pub mod rank;
pub mod report;
pub mod resolve;
pub mod risk;
pub mod score;

pub use classify::{IntegrationCategory, Pattern, Rule, RuleTable, classify};
pub use config::{AnalysisConfig, ConfigError};
pub use rank::RankedCandidate;
pub use report::{Analysis, ComparisonRow};
pub use resolve::{ResolveError, closure, closure_with_depth, dependents};
pub use risk::{MissingDependency, Relationship, RiskAssessment, RiskThresholds, Severity};
pub use score::{ComplexityScore, ScoreBreakdown, ScoreWeights};
