// Fetch the current engine snapshot and normalize it.

use crate::aggregator::{DiagnosticSink, MetricsAggregator, TracingSink};
use crate::engine_client::{EngineError, SnapshotSource};
use crate::models::Metrics;

pub struct MetricsRepo<S, D = TracingSink> {
    source: S,
    aggregator: MetricsAggregator<D>,
}

impl<S: SnapshotSource> MetricsRepo<S> {
    pub fn new(source: S) -> Self {
        Self::with_sink(source, TracingSink)
    }
}

impl<S: SnapshotSource, D: DiagnosticSink> MetricsRepo<S, D> {
    pub fn with_sink(source: S, sink: D) -> Self {
        Self {
            source,
            aggregator: MetricsAggregator::new(sink),
        }
    }

    pub fn aggregator(&self) -> &MetricsAggregator<D> {
        &self.aggregator
    }

    /// Current metrics: one fetch, one aggregation.
    pub async fn get(&self) -> Result<Metrics, EngineError> {
        let snapshot = self.source.fetch().await?;
        Ok(self.aggregator.aggregate(&snapshot))
    }
}
