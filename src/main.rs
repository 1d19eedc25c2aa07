use anyhow::Result;
use modeler::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let client = engine_client::EngineClient::new(&app_config.engine)?;
    tracing::info!(url = client.url(), "Polling engine metrics");
    let repo = Arc::new(metrics_repo::MetricsRepo::new(client));
    let latest = worker::shared_metrics();
    let stats = Arc::new(worker::RefreshStats::default());

    if let Err(e) = worker::refresh_once(&*repo, &latest, &stats).await {
        tracing::warn!(error = %e, "initial metrics refresh failed; serving 503 until next refresh");
    }

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            repo,
            latest: latest.clone(),
            stats,
            shutdown_rx,
        },
        worker::WorkerConfig {
            interval_ms: app_config.refresh.interval_ms,
            stats_log_interval_secs: app_config.refresh.stats_log_interval_secs,
        },
    );

    let app = routes::app(latest);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            #[cfg(unix)]
            {
                let mut sigterm = match tokio::signal::unix::signal(
                    tokio::signal::unix::SignalKind::terminate(),
                ) {
                    Ok(s) => s,
                    Err(_) => {
                        let _ = tokio::signal::ctrl_c().await;
                        return;
                    }
                };
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            #[cfg(not(unix))]
            {
                let _ = tokio::signal::ctrl_c().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    let _ = shutdown_tx.send(());
    let _ = worker_handle.await;

    Ok(())
}
