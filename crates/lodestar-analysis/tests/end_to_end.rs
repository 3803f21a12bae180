//! End-to-end analysis over a realistic extract: JSON component records,
//! a missing-component dataset, and a TOML configuration drive one full
//! pass, and the resulting ranking, risk report, and comparison are
//! checked against hand-computed expectations.

use lodestar_analysis::{
    Analysis, AnalysisConfig, IntegrationCategory, Relationship, Severity,
};
use lodestar_core::{GraphModel, MissingSet};

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// A small payroll system the way an ATX extract describes it: one JCL
/// entry point, three COBOL programs, a copybook, a DB2 table, an MQ
/// queue, and one call into a program that never made it out of the
/// archive.
const EXTRACT: &str = r#"[
    {
        "name": "PAYJOB",
        "type": "JCL",
        "dependencies": [
            {"name": "PAY001", "kind": "calls"},
            {"name": "PAYRPT", "kind": "calls"}
        ]
    },
    {
        "name": "PAY001",
        "type": "COB",
        "dependencies": [
            {"name": "PAYCOPY", "kind": "includes"},
            {"name": "DB2.PAYROLL", "kind": "reads"},
            {"name": "DB2.PAYROLL", "kind": "writes"},
            {"name": "TAXCALC", "kind": "calls"}
        ]
    },
    {
        "name": "PAYRPT",
        "type": "COB",
        "dependencies": [
            {"name": "PAYCOPY", "kind": "includes"},
            {"name": "MQ.PAYROLL.OUT", "kind": "invokes-external"}
        ]
    },
    {
        "name": "TAXCALC",
        "type": "COB",
        "dependencies": [
            {"name": "RATETBL", "kind": "calls"}
        ]
    },
    {"name": "PAYCOPY", "type": "CPY"}
]"#;

const MISSING: &str = r#"[
    {"Name": "RATETBL", "Type": "Missing Program", "Reason": "not in archive"}
]"#;

fn load() -> (GraphModel, MissingSet) {
    let model = GraphModel::from_json_str(EXTRACT).expect("extract parses");
    let missing = MissingSet::from_json_str(MISSING).expect("missing set parses");
    (model, missing)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn full_pass_with_default_config() {
    let (model, missing) = load();
    let analysis =
        Analysis::run(&model, &missing, &AnalysisConfig::default()).expect("analysis runs");

    // Every declared component is a candidate under the open filter.
    assert_eq!(analysis.ranked.len(), 5);

    // PAYCOPY has no dependencies at all and must rank simplest.
    assert_eq!(analysis.ranked[0].name, "PAYCOPY");
    assert_eq!(analysis.ranked[0].score, 0.0);

    // PAYJOB reaches the entire system and must rank last.
    let last = analysis.ranked.last().expect("non-empty ranking");
    assert_eq!(last.name, "PAYJOB");
    assert_eq!(last.rank, 5);
    assert_eq!(last.closure_size, 7, "everything incl. externals");

    // 5 declared, 1 missing.
    assert!((analysis.completeness - 5.0 / 6.0).abs() < 1e-12);
    assert_eq!(analysis.missing_by_type["Missing Program"], 1);
}

#[test]
fn integration_breakdown_covers_the_extract() {
    let (model, missing) = load();
    let analysis =
        Analysis::run(&model, &missing, &AnalysisConfig::default()).expect("analysis runs");

    let breakdown = &analysis.integration_breakdown;
    assert_eq!(
        breakdown[&IntegrationCategory::Batch],
        vec!["PAYJOB".to_string()]
    );
    assert_eq!(
        breakdown[&IntegrationCategory::Database],
        vec!["PAY001".to_string()]
    );
    assert_eq!(
        breakdown[&IntegrationCategory::Messaging],
        vec!["PAYRPT".to_string()]
    );
    // MQ.PAYROLL.OUT is not declared, so the invokes-external edge is an
    // external-system touchpoint.
    assert_eq!(
        breakdown[&IntegrationCategory::ExternalSystem],
        vec!["PAYRPT".to_string()]
    );
}

#[test]
fn closure_categories_aggregate_up_to_the_entry_point() {
    let (model, missing) = load();
    let analysis =
        Analysis::run(&model, &missing, &AnalysisConfig::default()).expect("analysis runs");

    let payjob = analysis
        .ranked
        .iter()
        .find(|c| c.name == "PAYJOB")
        .expect("ranked");
    for category in [
        IntegrationCategory::Batch,
        IntegrationCategory::Database,
        IntegrationCategory::Messaging,
        IntegrationCategory::ExternalSystem,
    ] {
        assert!(
            payjob.categories.contains(&category),
            "PAYJOB should aggregate {category} from its closure"
        );
    }
}

#[test]
fn missing_program_grades_transitive_and_direct_callers() {
    let (model, missing) = load();
    let analysis =
        Analysis::run(&model, &missing, &AnalysisConfig::default()).expect("analysis runs");

    // TAXCALC calls RATETBL directly: High regardless of ratio.
    let taxcalc = &analysis.risks["TAXCALC"];
    assert_eq!(taxcalc.severity, Severity::High);
    assert!(taxcalc.directly_missing);
    assert_eq!(taxcalc.missing[0].relationship, Relationship::Direct);

    // PAY001 reaches RATETBL through TAXCALC: graded by ratio (1 of 4).
    let pay001 = &analysis.risks["PAY001"];
    assert!(!pay001.directly_missing);
    assert_eq!(pay001.missing[0].relationship, Relationship::Transitive);
    assert_eq!(pay001.severity, Severity::Low);

    // PAYCOPY touches nothing and is clean.
    assert!(analysis.risks["PAYCOPY"].is_clean());

    // Worst first in the report.
    let report = analysis.risk_report();
    assert_eq!(report[0].name, "TAXCALC");
    assert!(report.iter().all(|a| a.severity > Severity::None));
}

#[test]
fn toml_config_shapes_the_run() {
    let (model, missing) = load();
    let config = AnalysisConfig::from_toml_str(
        r#"
        entry_point_types = ["JCL"]
        max_depth = 1

        [weights]
        depth = 0.0
        interaction_volume = 0.0
        "#,
    )
    .expect("config parses");

    let analysis = Analysis::run(&model, &missing, &config).expect("analysis runs");
    assert_eq!(analysis.ranked.len(), 1);
    let payjob = &analysis.ranked[0];
    assert_eq!(payjob.name, "PAYJOB");
    assert_eq!(payjob.closure_size, 2, "depth 1 sees only direct calls");
}

#[test]
fn comparison_rows_follow_the_ranking() {
    let (model, missing) = load();
    let analysis =
        Analysis::run(&model, &missing, &AnalysisConfig::default()).expect("analysis runs");

    let rows = analysis
        .compare(&["PAYJOB", "TAXCALC", "PAYCOPY"])
        .expect("all names are ranked");
    assert_eq!(rows[0].name, "PAYCOPY");
    assert_eq!(rows.last().map(|r| r.name.as_str()), Some("PAYJOB"));
    let taxcalc = rows.iter().find(|r| r.name == "TAXCALC").expect("row");
    assert_eq!(taxcalc.missing.len(), 1);
    assert_eq!(taxcalc.missing[0].name, "RATETBL");

    assert!(analysis.compare(&["DB2.PAYROLL"]).is_err(), "externals are not candidates");
}

#[test]
fn report_serializes_deterministically() {
    let (model, missing) = load();
    let config = AnalysisConfig::default();
    let a = Analysis::run(&model, &missing, &config).expect("analysis runs");
    let b = Analysis::run(&model, &missing, &config).expect("analysis runs");
    assert_eq!(
        serde_json::to_string_pretty(&a).expect("serializes"),
        serde_json::to_string_pretty(&b).expect("serializes"),
    );
    assert!(a.fingerprint.starts_with("blake3:"));
}
