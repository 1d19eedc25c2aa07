// Snapshot -> Metrics: group deployed definitions by logical key, one entry per version.

use std::collections::HashMap;

use crate::key_parser::{KeyParser, Malformed};
use crate::models::{Metrics, ProcessMetrics, RawSnapshot, VersionCounts};

/// Receives one event per identifier dropped during aggregation.
pub trait DiagnosticSink {
    fn malformed(&self, err: &Malformed);
}

/// Default sink: one structured `tracing` event per skipped identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn malformed(&self, err: &Malformed) {
        tracing::info!(
            identifier = %err.identifier,
            reason = err.reason(),
            "process definition does not match \"<name> (<version>)\"; skipped"
        );
    }
}

/// Aggregates `snapshot`, logging malformed identifiers through [`TracingSink`].
pub fn aggregate(snapshot: &RawSnapshot) -> Metrics {
    MetricsAggregator::new(TracingSink).aggregate(snapshot)
}

pub struct MetricsAggregator<S> {
    sink: S,
}

impl<S: DiagnosticSink> MetricsAggregator<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Builds a fresh [`Metrics`] from `snapshot`. Never fails: identifiers that do not
    /// parse are reported to the sink and left out.
    ///
    /// When the same key/version pair shows up more than once, the last one wins.
    pub fn aggregate(&self, snapshot: &RawSnapshot) -> Metrics {
        let mut processes: HashMap<&str, ProcessMetrics> = HashMap::new();

        for identifier in &snapshot.deployed_process_definitions {
            let parsed = match KeyParser::parse(identifier) {
                Ok(p) => p,
                Err(e) => {
                    self.sink.malformed(&e);
                    continue;
                }
            };
            let counts = VersionCounts::new(
                snapshot
                    .completed_process_instance_count
                    .get(identifier)
                    .copied(),
                snapshot
                    .running_process_instance_count
                    .get(identifier)
                    .copied(),
            );
            processes
                .entry(parsed.key)
                .or_insert_with(|| ProcessMetrics::new(parsed.key))
                .update_or_create(parsed.version, counts);
        }

        let mut processes: Vec<ProcessMetrics> = processes.into_values().collect();
        processes.sort_by(|a, b| a.key.cmp(&b.key));

        tracing::debug!(
            operation = "aggregate",
            deployed = snapshot.deployed_process_definitions.len(),
            processes = processes.len(),
            "snapshot aggregated"
        );

        Metrics {
            completed_activities: snapshot.completed_activities,
            process_definition_count: snapshot.process_definition_count,
            cached_process_definition_count: snapshot.cached_process_definition_count,
            processes,
        }
    }
}
