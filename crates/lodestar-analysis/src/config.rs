//! Analysis configuration.
//!
//! One [`AnalysisConfig`] value carries everything tunable about a run:
//! scoring weights, risk thresholds, the traversal depth bound, the
//! entry-point type filter, and the classification rule table. Every
//! field defaults, so an empty TOML document is a valid configuration,
//! and unknown top-level keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::RuleTable;
use crate::risk::RiskThresholds;
use crate::score::ScoreWeights;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON document could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A scoring weight is negative.
    #[error("scoring weight `{field}` must be non-negative, got {value}")]
    NegativeWeight {
        /// Name of the offending weight field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A risk threshold is outside `0.0..=1.0` or the tiers are out of
    /// order.
    #[error("risk thresholds must satisfy 0.0 <= medium <= high <= 1.0, got medium={medium} high={high}")]
    InvalidThresholds {
        /// The configured medium threshold.
        medium: f64,
        /// The configured high threshold.
        high: f64,
    },
}

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

/// The full tunable surface of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Relative weights for the complexity score factors.
    pub weights: ScoreWeights,
    /// Severity tier thresholds for the missing ratio.
    pub thresholds: RiskThresholds,
    /// Depth bound for transitive resolution; `None` walks full
    /// closures.
    pub max_depth: Option<usize>,
    /// Component type tags eligible as ranking candidates
    /// (case-insensitive). Empty means every declared component is a
    /// candidate.
    pub entry_point_types: Vec<String>,
    /// Classification rules; defaults to the built-in mainframe
    /// conventions.
    pub rules: RuleTable,
}

impl AnalysisConfig {
    /// Parse and validate a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed TOML or invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON or invalid values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check weight and threshold ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeWeight`] or
    /// [`ConfigError::InvalidThresholds`] for out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("dependency_count", self.weights.dependency_count),
            ("integration_diversity", self.weights.integration_diversity),
            ("depth", self.weights.depth),
            ("interaction_volume", self.weights.interaction_volume),
        ];
        for (field, value) in weights {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeWeight { field, value });
            }
        }

        let RiskThresholds { medium, high } = self.thresholds;
        let ordered = (0.0..=1.0).contains(&medium) && (0.0..=1.0).contains(&high) && medium <= high;
        if !ordered {
            return Err(ConfigError::InvalidThresholds { medium, high });
        }

        debug!(rules = self.rules.len(), max_depth = ?self.max_depth, "configuration validated");
        Ok(())
    }

    /// Whether `kind` qualifies as a ranking candidate under the
    /// entry-point filter.
    #[must_use]
    pub fn is_entry_point_type(&self, kind: &str) -> bool {
        self.entry_point_types.is_empty()
            || self
                .entry_point_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(kind))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::Severity;

    #[test]
    fn empty_document_is_the_default_config() {
        let config = AnalysisConfig::from_toml_str("").expect("parse");
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.weights.dependency_count, 1.0);
        assert_eq!(config.thresholds.high, 0.5);
        assert!(config.max_depth.is_none());
        assert!(!config.rules.is_empty(), "built-in rules apply by default");
    }

    #[test]
    fn full_document_round_trips() {
        let text = r#"
            max_depth = 3
            entry_point_types = ["JCL", "TRANSACTION"]

            [weights]
            dependency_count = 2.0
            depth = 0.0

            [thresholds]
            medium = 0.2
            high = 0.6

            [[rules]]
            category = "messaging"
            target = { prefix = "KAFKA" }
        "#;
        let config = AnalysisConfig::from_toml_str(text).expect("parse");
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.weights.dependency_count, 2.0);
        assert_eq!(config.weights.depth, 0.0);
        assert_eq!(config.weights.integration_diversity, 1.0, "untouched default");
        assert_eq!(config.thresholds.grade(0.2), Severity::Medium);
        assert_eq!(config.rules.len(), 1, "explicit rules replace the built-ins");
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = AnalysisConfig::from_toml_str("[weights]\ndepth = -1.0").expect_err("must fail");
        assert!(matches!(
            err,
            ConfigError::NegativeWeight {
                field: "depth",
                ..
            }
        ));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let err = AnalysisConfig::from_toml_str("[thresholds]\nmedium = 0.8\nhigh = 0.2")
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidThresholds { .. }));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(AnalysisConfig::from_toml_str("[thresholds]\nhigh = 1.5").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AnalysisConfig::from_toml_str("max_deth = 3").is_err());
    }

    #[test]
    fn entry_point_filter_is_case_insensitive() {
        let config = AnalysisConfig {
            entry_point_types: vec!["JCL".to_string()],
            ..AnalysisConfig::default()
        };
        assert!(config.is_entry_point_type("jcl"));
        assert!(!config.is_entry_point_type("COB"));

        let open = AnalysisConfig::default();
        assert!(open.is_entry_point_type("ANYTHING"));
    }

    #[test]
    fn json_form_is_accepted() {
        let config =
            AnalysisConfig::from_json_str(r#"{"max_depth": 2, "entry_point_types": ["JCL"]}"#)
                .expect("parse");
        assert_eq!(config.max_depth, Some(2));
    }
}
