//! Rule-driven integration classification.
//!
//! # Overview
//!
//! Each component is tagged with zero or more [`IntegrationCategory`]
//! values by running it through an ordered [`RuleTable`]. Rules are
//! declarative matchers over the component's type tag, its interaction
//! kinds, and its target names, so new categories are additive
//! configuration rather than code changes. A component can land in
//! several categories at once (a batch job with embedded SQL is both
//! `batch` and `database`).
//!
//! The built-in [`RuleTable::default`] reproduces the naming
//! conventions of typical mainframe extracts: `JCL`/`PROC` type tags are
//! batch, `TRANSACTION`/`BMS`/`CICS*` are online, `DB2`/`SQL` names are
//! database, `MQ` names are messaging, `FTP`/`XMIT` names are file
//! transfer, and `invokes-external` interactions against unresolved
//! targets are external systems.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use lodestar_core::{Component, GraphModel, InteractionKind};

// ---------------------------------------------------------------------------
// IntegrationCategory
// ---------------------------------------------------------------------------

/// A classification label describing how a component interacts with
/// other systems.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationCategory {
    /// Relational or hierarchical database access.
    Database,
    /// Batch execution (JCL jobs, procedures).
    Batch,
    /// Online/interactive processing (CICS transactions, screens).
    Online,
    /// File-transfer integration.
    FileTransfer,
    /// Queue-based messaging.
    Messaging,
    /// Invocation of a system outside the extracted universe.
    ExternalSystem,
}

impl IntegrationCategory {
    /// All known categories, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Database,
        Self::Batch,
        Self::Online,
        Self::FileTransfer,
        Self::Messaging,
        Self::ExternalSystem,
    ];

    /// Stable kebab-case name, matching the wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Batch => "batch",
            Self::Online => "online",
            Self::FileTransfer => "file-transfer",
            Self::Messaging => "messaging",
            Self::ExternalSystem => "external-system",
        }
    }
}

impl fmt::Display for IntegrationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A case-insensitive string matcher used in classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    /// Whole-string match.
    Exact(String),
    /// Match at the start of the candidate.
    Prefix(String),
    /// Match at the end of the candidate.
    Suffix(String),
    /// Match anywhere in the candidate.
    Contains(String),
}

impl Pattern {
    /// Whether `candidate` matches, ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.to_ascii_uppercase();
        match self {
            Self::Exact(p) => candidate == p.to_ascii_uppercase(),
            Self::Prefix(p) => candidate.starts_with(&p.to_ascii_uppercase()),
            Self::Suffix(p) => candidate.ends_with(&p.to_ascii_uppercase()),
            Self::Contains(p) => candidate.contains(&p.to_ascii_uppercase()),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// One declarative classification rule.
///
/// A rule with only `component_type` matches on the component itself.
/// A rule with any interaction matcher (`kind`, `target`,
/// `external_only`) fires when at least one interaction satisfies every
/// interaction matcher. When both sides are present, both must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Interaction kind the rule applies to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InteractionKind>,
    /// Pattern over the interaction's target name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Pattern>,
    /// Pattern over the component's declared type tag, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<Pattern>,
    /// Restrict interaction matching to targets that are not declared
    /// components (unresolved externals).
    #[serde(default)]
    pub external_only: bool,
    /// Category assigned when the rule fires.
    pub category: IntegrationCategory,
}

impl Rule {
    const fn has_interaction_matcher(&self) -> bool {
        self.kind.is_some() || self.target.is_some() || self.external_only
    }

    fn fires(&self, component: &Component, model: &GraphModel) -> bool {
        if let Some(pattern) = &self.component_type {
            if !pattern.matches(&component.kind) {
                return false;
            }
        }
        if !self.has_interaction_matcher() {
            // Pure component-type rule.
            return self.component_type.is_some();
        }
        component.interactions.iter().any(|interaction| {
            if self.kind.is_some_and(|k| k != interaction.kind) {
                return false;
            }
            if self.external_only && model.contains(&interaction.target) {
                return false;
            }
            self.target
                .as_ref()
                .is_none_or(|pattern| pattern.matches(&interaction.target))
        })
    }
}

// ---------------------------------------------------------------------------
// RuleTable
// ---------------------------------------------------------------------------

/// An ordered, extensible classification rule table.
///
/// Serializes transparently as a rule array, so a `rules` key in a
/// configuration document is a plain `[[rules]]` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    /// Rules, evaluated in order; every firing rule contributes its
    /// category.
    pub rules: Vec<Rule>,
}

impl RuleTable {
    /// Parse a rule table from a standalone TOML document with
    /// `[[rules]]` entries. A document with no rules yields the
    /// built-in table.
    ///
    /// # Errors
    ///
    /// Returns the TOML deserialization error for malformed input.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Doc {
            #[serde(default)]
            rules: Option<RuleTable>,
        }
        let doc: Doc = toml::from_str(text)?;
        Ok(doc.rules.unwrap_or_default())
    }

    /// Parse a rule table from a JSON array of rules.
    ///
    /// # Errors
    ///
    /// Returns the JSON deserialization error for malformed input.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    /// The built-in table reproducing common mainframe extract naming
    /// conventions. Callers extend or replace it through configuration.
    fn default() -> Self {
        use IntegrationCategory as Cat;

        let component_type = |pattern: Pattern, category: Cat| Rule {
            kind: None,
            target: None,
            component_type: Some(pattern),
            external_only: false,
            category,
        };
        let target = |kind: Option<InteractionKind>, pattern: Pattern, category: Cat| Rule {
            kind,
            target: Some(pattern),
            component_type: None,
            external_only: false,
            category,
        };

        Self {
            rules: vec![
                // Batch entry points and procedures.
                component_type(Pattern::Exact("JCL".to_string()), Cat::Batch),
                component_type(Pattern::Exact("PROC".to_string()), Cat::Batch),
                // Online (CICS) component types.
                component_type(Pattern::Exact("TRANSACTION".to_string()), Cat::Online),
                component_type(Pattern::Exact("BMS".to_string()), Cat::Online),
                component_type(Pattern::Contains("CICS".to_string()), Cat::Online),
                component_type(Pattern::Exact("CSDCOMMAND".to_string()), Cat::Online),
                // Database access by type tag or target naming convention.
                component_type(Pattern::Contains("SQL".to_string()), Cat::Database),
                component_type(Pattern::Exact("DDL".to_string()), Cat::Database),
                component_type(Pattern::Exact("DCL".to_string()), Cat::Database),
                target(None, Pattern::Prefix("DB".to_string()), Cat::Database),
                target(None, Pattern::Contains("SQL".to_string()), Cat::Database),
                // Messaging by queue naming convention.
                target(None, Pattern::Prefix("MQ".to_string()), Cat::Messaging),
                target(None, Pattern::Contains("QUEUE".to_string()), Cat::Messaging),
                // File transfer.
                target(None, Pattern::Contains("FTP".to_string()), Cat::FileTransfer),
                target(None, Pattern::Contains("XMIT".to_string()), Cat::FileTransfer),
                // Anything invoking an unresolved target is an external
                // system touchpoint.
                Rule {
                    kind: Some(InteractionKind::InvokesExternal),
                    target: None,
                    component_type: None,
                    external_only: true,
                    category: Cat::ExternalSystem,
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Run `component` through `table` and collect every category whose
/// rule fires.
#[must_use]
pub fn classify(
    component: &Component,
    model: &GraphModel,
    table: &RuleTable,
) -> BTreeSet<IntegrationCategory> {
    table
        .rules
        .iter()
        .filter(|rule| rule.fires(component, model))
        .map(|rule| rule.category)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
