//! Dependency graph construction and statistics.
//!
//! # Pipeline
//!
//! ```text
//! ATX JSON (components + interactions)
//!        ↓  build::GraphModel::load()
//! GraphModel (DiGraph, possibly cyclic, externals marked, warnings)
//!        ↓  stats::GraphStats::from_model()
//! GraphStats (density, cycle count, degree extremes, …)
//! ```
//!
//! The model is immutable after load and safe to share across threads
//! for concurrent read-only analysis.

pub mod build;
pub mod stats;

pub use build::GraphModel;
pub use stats::GraphStats;
