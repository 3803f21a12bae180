#![forbid(unsafe_code)]
//! lodestar-core library.
//!
//! Data model and graph construction for the lodestar analysis engine:
//! the ATX component/interaction model, the petgraph-backed
//! [`GraphModel`], the missing-component dataset, and the shared error
//! and warning taxonomy.
//!
//! # Conventions
//!
//! - **Errors**: fatal load failures use the typed [`error::GraphError`].
//! - **Warnings**: recoverable input defects ([`error::Warning`]) are
//!   data carried on the model, never errors.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod error;
pub mod graph;
pub mod model;

pub use error::{GraphError, Warning};
pub use graph::{GraphModel, GraphStats};
pub use model::{Component, Direction, Interaction, InteractionKind, MissingComponent, MissingSet};
