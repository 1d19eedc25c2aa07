// Aggregation tests: grouping by logical key, overwrite rule, absent counts, skipped identifiers

mod common;

use common::{RecordingSink, snapshot};
use modeler::aggregator::MetricsAggregator;
use modeler::key_parser::MALFORMED_IDENTIFIER;
use modeler::models::{RawSnapshot, VersionCounts};

fn counts(completed: i64, running: i64) -> VersionCounts {
    VersionCounts::new(Some(completed), Some(running))
}

#[test]
fn groups_versions_of_one_process() {
    let s = snapshot(&[
        ("orderProcess (v1)", Some(3), Some(1)),
        ("orderProcess (v2)", Some(5), Some(0)),
    ]);
    let metrics = modeler::aggregate(&s);

    assert_eq!(metrics.processes.len(), 1);
    let order = metrics.process("orderProcess").unwrap();
    assert_eq!(order.versions.len(), 2);
    assert_eq!(order.version("v1"), Some(&counts(3, 1)));
    assert_eq!(order.version("v2"), Some(&counts(5, 0)));
}

#[test]
fn separates_distinct_processes() {
    let s = snapshot(&[
        ("orderProcess (v1)", Some(3), Some(1)),
        ("invoice (v1)", Some(9), Some(2)),
        ("orderProcess (v3)", Some(1), Some(1)),
    ]);
    let metrics = modeler::aggregate(&s);

    let keys: Vec<&str> = metrics.processes.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["invoice", "orderProcess"]);
    assert_eq!(metrics.process("invoice").unwrap().versions.len(), 1);
    assert_eq!(metrics.process("orderProcess").unwrap().versions.len(), 2);
}

#[test]
fn passes_through_top_level_counters() {
    let s = snapshot(&[("p (v1)", Some(1), Some(1))]);
    let metrics = modeler::aggregate(&s);
    assert_eq!(metrics.completed_activities, 120);
    assert_eq!(metrics.process_definition_count, 7);
    assert_eq!(metrics.cached_process_definition_count, 4);
}

#[test]
fn empty_snapshot_has_no_processes() {
    let s = snapshot(&[]);
    let metrics = modeler::aggregate(&s);
    assert!(metrics.processes.is_empty());
    assert_eq!(metrics.completed_activities, 120);
    assert_eq!(metrics.process_definition_count, 7);
    assert_eq!(metrics.cached_process_definition_count, 4);
}

#[test]
fn default_snapshot_aggregates_to_zeroes() {
    let metrics = modeler::aggregate(&RawSnapshot::default());
    assert_eq!(metrics, Default::default());
}

#[test]
fn duplicate_identifier_yields_one_version_entry_without_summing() {
    let mut s = snapshot(&[("p (v1)", Some(4), Some(2))]);
    s.deployed_process_definitions.push("p (v1)".into());

    let metrics = modeler::aggregate(&s);
    let p = metrics.process("p").unwrap();
    assert_eq!(p.versions.len(), 1);
    assert_eq!(p.version("v1"), Some(&counts(4, 2)));
}

#[test]
fn extra_space_before_suffix_is_part_of_the_key() {
    let s = snapshot(&[("p (v1)", Some(1), Some(1)), ("p  (v1)", Some(42), None)]);
    let metrics = modeler::aggregate(&s);
    assert_eq!(metrics.processes.len(), 2);
    assert_eq!(metrics.process("p").unwrap().version("v1"), Some(&counts(1, 1)));
    assert_eq!(
        metrics.process("p ").unwrap().version("v1"),
        Some(&VersionCounts::new(Some(42), None))
    );
}

#[test]
fn missing_counts_are_absent_not_zero() {
    let s = snapshot(&[
        ("noCompleted (v1)", None, Some(3)),
        ("noRunning (v1)", Some(8), None),
        ("nothing (v1)", None, None),
    ]);
    let metrics = modeler::aggregate(&s);
    assert_eq!(
        metrics.process("noCompleted").unwrap().version("v1"),
        Some(&VersionCounts::new(None, Some(3)))
    );
    assert_eq!(
        metrics.process("noRunning").unwrap().version("v1"),
        Some(&VersionCounts::new(Some(8), None))
    );
    assert_eq!(
        metrics.process("nothing").unwrap().version("v1"),
        Some(&VersionCounts::default())
    );
}

#[test]
fn malformed_identifiers_are_skipped_and_reported() {
    let s = snapshot(&[
        ("orderProcess (v1)", Some(3), Some(1)),
        ("orderProcess", Some(1), Some(1)),
        ("orderProcess (1)", Some(1), Some(1)),
        ("", None, None),
        ("orderProcess (v1) (v2)", Some(1), Some(1)),
    ]);
    let aggregator = MetricsAggregator::new(RecordingSink::default());
    let metrics = aggregator.aggregate(&s);

    assert_eq!(metrics.processes.len(), 1);
    let order = metrics.process("orderProcess").unwrap();
    assert_eq!(order.versions.len(), 1);
    assert_eq!(order.version("v1"), Some(&counts(3, 1)));

    assert_eq!(
        aggregator.sink().identifiers(),
        vec![
            "orderProcess".to_string(),
            "orderProcess (1)".to_string(),
            String::new(),
            "orderProcess (v1) (v2)".to_string(),
        ]
    );
    assert!(
        aggregator
            .sink()
            .events
            .lock()
            .unwrap()
            .iter()
            .all(|(_, reason)| *reason == MALFORMED_IDENTIFIER)
    );
}

#[test]
fn all_malformed_still_returns_metrics() {
    let s = snapshot(&[("a", Some(1), None), ("b (x)", None, Some(1))]);
    let aggregator = MetricsAggregator::new(RecordingSink::default());
    let metrics = aggregator.aggregate(&s);
    assert!(metrics.processes.is_empty());
    assert_eq!(metrics.completed_activities, 120);
    assert_eq!(aggregator.sink().identifiers().len(), 2);
}

#[test]
fn disjoint_snapshots_concatenate() {
    let a = snapshot(&[
        ("orderProcess (v1)", Some(3), Some(1)),
        ("invoice (v2)", Some(2), None),
    ]);
    let b = snapshot(&[
        ("orderProcess (v2)", Some(5), Some(0)),
        ("shipping (v1)", None, Some(7)),
    ]);

    let mut combined = a.clone();
    combined
        .deployed_process_definitions
        .extend(b.deployed_process_definitions.iter().cloned());
    combined
        .completed_process_instance_count
        .extend(b.completed_process_instance_count.clone());
    combined
        .running_process_instance_count
        .extend(b.running_process_instance_count.clone());

    let whole = modeler::aggregate(&combined);
    let (ma, mb) = (modeler::aggregate(&a), modeler::aggregate(&b));

    // Merge per-key results from the two halves.
    let mut expected = ma.processes.clone();
    for p in mb.processes {
        match expected.iter_mut().find(|e| e.key == p.key) {
            Some(e) => e.versions.extend(p.versions),
            None => expected.push(p),
        }
    }
    expected.sort_by(|x, y| x.key.cmp(&y.key));

    assert_eq!(whole.processes, expected);
}

#[test]
fn input_snapshot_is_not_modified() {
    let s = snapshot(&[("p (v1)", Some(1), Some(1)), ("bad", None, None)]);
    let before = s.clone();
    let _ = modeler::aggregate(&s);
    assert_eq!(s, before);
}

#[test]
fn default_aggregate_logs_and_skips_all_malformed() {
    let s = snapshot(&[("a", Some(1), None), ("p (v1) (v2)", None, Some(1)), ("", None, None)]);
    let metrics = modeler::aggregate(&s);
    assert!(metrics.processes.is_empty());
    assert_eq!(metrics.completed_activities, 120);
    assert_eq!(metrics.process_definition_count, 7);
}
