// Background refresh worker: fetch + aggregate on an interval, publish the latest Metrics.
// A failed refresh keeps the previously published value.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tokio::time::{Duration, interval};

use crate::aggregator::DiagnosticSink;
use crate::engine_client::{EngineError, SnapshotSource};
use crate::metrics_repo::MetricsRepo;
use crate::models::Metrics;

/// Latest successfully aggregated metrics, shared between the worker and HTTP handlers.
/// `None` until the first refresh succeeds.
pub type SharedMetrics = Arc<RwLock<Option<Arc<Metrics>>>>;

pub fn shared_metrics() -> SharedMetrics {
    Arc::new(RwLock::new(None))
}

#[derive(Debug, Default)]
pub struct RefreshStats {
    pub ok_total: AtomicU64,
    pub failed_total: AtomicU64,
}

pub struct WorkerDeps<S, D> {
    pub repo: Arc<MetricsRepo<S, D>>,
    pub latest: SharedMetrics,
    pub stats: Arc<RefreshStats>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub interval_ms: u64,
    /// How often to log refresh stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Runs one fetch + aggregate and publishes the result. Used by the worker loop and at startup.
pub async fn refresh_once<S, D>(
    repo: &MetricsRepo<S, D>,
    latest: &SharedMetrics,
    stats: &RefreshStats,
) -> Result<(), EngineError>
where
    S: SnapshotSource,
    D: DiagnosticSink,
{
    match repo.get().await {
        Ok(metrics) => {
            tracing::debug!(
                operation = "refresh_metrics",
                processes = metrics.processes.len(),
                "metrics refreshed"
            );
            *latest.write().await = Some(Arc::new(metrics));
            stats.ok_total.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
        Err(e) => {
            stats.failed_total.fetch_add(1, Ordering::Relaxed);
            Err(e)
        }
    }
}

pub fn spawn<S, D>(deps: WorkerDeps<S, D>, config: WorkerConfig) -> tokio::task::JoinHandle<()>
where
    S: SnapshotSource + 'static,
    D: DiagnosticSink + Send + Sync + 'static,
{
    let WorkerDeps {
        repo,
        latest,
        stats,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        interval_ms,
        stats_log_interval_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = refresh_once(&*repo, &latest, &stats).await {
                        tracing::warn!(
                            error = %e,
                            operation = "fetch_snapshot",
                            "metrics refresh failed; keeping previous value"
                        );
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        refreshes_ok_total = stats.ok_total.load(Ordering::Relaxed),
                        refreshes_failed_total = stats.failed_total.load(Ordering::Relaxed),
                        "refresh stats"
                    );
                }
            }
        }
    })
}
