// Shared test helpers

#![allow(dead_code)]

use std::sync::Mutex;

use modeler::aggregator::DiagnosticSink;
use modeler::key_parser::Malformed;
use modeler::models::RawSnapshot;

/// Snapshot with fixed top-level counters and the given `(identifier, completed, running)` rows.
pub fn snapshot(rows: &[(&str, Option<i64>, Option<i64>)]) -> RawSnapshot {
    let mut s = RawSnapshot {
        completed_activities: 120,
        process_definition_count: 7,
        cached_process_definition_count: 4,
        ..Default::default()
    };
    for (id, completed, running) in rows {
        s.deployed_process_definitions.push(id.to_string());
        if let Some(c) = completed {
            s.completed_process_instance_count.insert(id.to_string(), *c);
        }
        if let Some(r) = running {
            s.running_process_instance_count.insert(id.to_string(), *r);
        }
    }
    s
}

/// Sink that records every skipped identifier.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<(String, &'static str)>>,
}

impl RecordingSink {
    pub fn identifiers(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn malformed(&self, err: &Malformed) {
        self.events
            .lock()
            .unwrap()
            .push((err.identifier.clone(), err.reason()));
    }
}
