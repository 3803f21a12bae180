//! Missing-component dataset.
//!
//! Missing components come from an independent discovery pass (a CSV in
//! the original toolkit) and reference graph components by identifier
//! only. A missing identifier need not exist in the graph: the risk
//! analyzer computes the intersection, it never assumes one.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// MissingComponent
// ---------------------------------------------------------------------------

/// One record of the missing-components dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingComponent {
    /// Identifier, matched against graph component names.
    #[serde(alias = "Name")]
    pub name: String,
    /// Declared type of the missing artifact (`Missing Program`,
    /// `Missing Copybook`, `Missing Dataset`, …).
    #[serde(rename = "type", alias = "Type")]
    pub kind: String,
    /// Optional reason or category supplied by the discovery tooling.
    #[serde(default, alias = "Reason")]
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// MissingSet
// ---------------------------------------------------------------------------

/// The missing-components dataset with O(1) membership by identifier.
///
/// Duplicate names keep the first record seen, matching how the graph
/// model resolves duplicate component declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingSet {
    records: HashMap<String, MissingComponent>,
}

impl MissingSet {
    /// Build a set from already-parsed records.
    #[must_use]
    pub fn from_records(records: Vec<MissingComponent>) -> Self {
        let mut map: HashMap<String, MissingComponent> = HashMap::with_capacity(records.len());
        for record in records {
            if map.contains_key(&record.name) {
                warn!(name = %record.name, "duplicate missing-component record; first wins");
                continue;
            }
            map.insert(record.name.clone(), record);
        }
        Self { records: map }
    }

    /// Parse a JSON array of missing-component records.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error for malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<MissingComponent> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Whether `name` is recorded as missing.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Look up the full record for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MissingComponent> {
        self.records.get(name)
    }

    /// Number of distinct missing identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &MissingComponent> {
        self.records.values()
    }

    /// Count of missing components grouped by declared type, sorted by
    /// type name for deterministic output.
    #[must_use]
    pub fn by_type(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in self.records.values() {
            *counts.entry(record.kind.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a MissingSet {
    type Item = &'a MissingComponent;
    type IntoIter = std::collections::hash_map::Values<'a, String, MissingComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}
