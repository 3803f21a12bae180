//! Property tests over randomly shaped extracts: resolution invariants,
//! score bounds, ranking order, and fingerprint stability hold for any
//! graph the generator can produce, cycles included.

use proptest::prelude::*;

use lodestar_analysis::{
    Analysis, AnalysisConfig, RiskThresholds, closure, closure_with_depth, dependents,
};
use lodestar_core::{Component, Direction, GraphModel, Interaction, InteractionKind, MissingSet};

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

const KINDS: [InteractionKind; 5] = [
    InteractionKind::Calls,
    InteractionKind::Reads,
    InteractionKind::Writes,
    InteractionKind::InvokesExternal,
    InteractionKind::Includes,
];

fn node_name(index: usize) -> String {
    format!("PGM{index:03}")
}

/// An arbitrary extract: up to 12 declared components with up to 30
/// random edges between them (self-edges and duplicates permitted; the
/// loader handles both). Every generated record is valid, so loading
/// cannot fail.
fn arb_extract() -> impl Strategy<Value = Vec<Component>> {
    (
        1usize..12,
        proptest::collection::vec((0usize..12, 0usize..12, 0usize..5), 0..30),
    )
        .prop_map(|(node_count, raw_edges)| {
            (0..node_count)
                .map(|index| Component {
                    name: node_name(index),
                    kind: if index % 3 == 0 { "JCL" } else { "COB" }.to_string(),
                    interactions: raw_edges
                        .iter()
                        .filter(|(source, _, _)| source % node_count == index)
                        .map(|&(_, target, kind)| Interaction {
                            target: node_name(target % node_count),
                            kind: KINDS[kind],
                            direction: Direction::Outbound,
                        })
                        .collect(),
                })
                .collect()
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// The starting component is never a member of its own closure, and
    /// every member is a node of the graph.
    #[test]
    fn closure_excludes_start_and_stays_in_graph(records in arb_extract()) {
        let model = GraphModel::load(records).expect("generated records are valid");
        for name in model.component_names() {
            let members = closure(&model, name, None).expect("declared name resolves");
            prop_assert!(!members.contains(name));
            for member in &members {
                prop_assert!(model.contains(member) || model.is_external(member));
            }
        }
    }

    /// Tightening the depth bound can only shrink the closure, and the
    /// reported depths respect the bound.
    #[test]
    fn depth_bound_is_monotonic(records in arb_extract(), bound in 0usize..6) {
        let model = GraphModel::load(records).expect("generated records are valid");
        for name in model.component_names() {
            let bounded = closure_with_depth(&model, name, Some(bound)).expect("resolves");
            let wider = closure(&model, name, Some(bound + 1)).expect("resolves");
            let full = closure(&model, name, None).expect("resolves");
            for (member, depth) in &bounded {
                prop_assert!(*depth <= bound);
                prop_assert!(wider.contains(member));
                prop_assert!(full.contains(member));
            }
        }
    }

    /// Scores are non-negative and finite under default weights, and the
    /// ranking is sorted by them with contiguous 1-based ranks.
    #[test]
    fn ranking_is_sorted_and_scores_bounded(records in arb_extract()) {
        let model = GraphModel::load(records).expect("generated records are valid");
        let analysis = Analysis::run(&model, &MissingSet::default(), &AnalysisConfig::default())
            .expect("default config is valid");

        for (position, row) in analysis.ranked.iter().enumerate() {
            prop_assert_eq!(row.rank, position + 1);
            prop_assert!(row.score.is_finite());
            prop_assert!(row.score >= 0.0);
        }
        for pair in analysis.ranked.windows(2) {
            prop_assert!(pair[0].score <= pair[1].score);
        }
    }

    /// The fingerprint depends on the edge set, not on declaration order.
    #[test]
    fn fingerprint_ignores_declaration_order(records in arb_extract(), seed in any::<usize>()) {
        let forward = GraphModel::load(records.clone()).expect("generated records are valid");
        let mut shuffled = records;
        // Cheap deterministic shuffle.
        let len = shuffled.len();
        for i in 0..len {
            let j = seed.wrapping_mul(31).wrapping_add(i * 7) % len;
            shuffled.swap(i, j);
        }
        let reordered = GraphModel::load(shuffled).expect("generated records are valid");
        prop_assert_eq!(forward.fingerprint(), reordered.fingerprint());
    }

    /// On a graph with no externals, the reverse view inverts the
    /// forward one: `b` is in `closure(a)` exactly when `a` is in
    /// `dependents(b)`.
    #[test]
    fn dependents_inverts_closure(records in arb_extract()) {
        let model = GraphModel::load(records).expect("generated records are valid");
        for a in model.component_names() {
            let forward = closure(&model, a, None).expect("resolves");
            for b in model.component_names() {
                let reverse = dependents(&model, b).expect("resolves");
                prop_assert_eq!(
                    forward.contains(b),
                    reverse.contains(a),
                    "a={} b={}", a, b
                );
            }
        }
    }

    /// Severity never decreases as the missing ratio grows.
    #[test]
    fn severity_is_monotonic_in_the_ratio(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let thresholds = RiskThresholds::default();
        let (lower, higher) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(thresholds.grade(lower) <= thresholds.grade(higher));
    }

    /// Risk ratios stay within the unit interval and a clean dataset
    /// grades everything severity none.
    #[test]
    fn clean_dataset_has_no_risk(records in arb_extract()) {
        let model = GraphModel::load(records).expect("generated records are valid");
        let analysis = Analysis::run(&model, &MissingSet::default(), &AnalysisConfig::default())
            .expect("default config is valid");
        for assessment in analysis.risks.values() {
            prop_assert!((0.0..=1.0).contains(&assessment.missing_ratio));
            prop_assert!(assessment.is_clean());
        }
        prop_assert!(analysis.risk_report().is_empty());
    }
}
