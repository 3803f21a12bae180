//! ATX data model: components, interactions, and the missing-component
//! dataset.
//!
//! Components and their declared interactions come from the extracted
//! dependency graph; missing components come from an independent dataset
//! and reference components by identifier only (weak references that may
//! dangle).

pub mod component;
pub mod missing;

pub use component::{Component, Direction, Interaction, InteractionKind};
pub use missing::{MissingComponent, MissingSet};
