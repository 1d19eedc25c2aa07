// Domain models

mod metrics;
mod snapshot;

pub use metrics::{Metrics, ProcessMetrics, VersionCounts};
pub use snapshot::RawSnapshot;
