// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::application::chart_engine::{EngineSize, MountPoint};
use crate::application::chart_lifecycle::ChartLifecycle;
use crate::application::series_source::SeriesSource;
use crate::application::signal_chart::SignalChart;
use crate::domain::export::ExportSettings;
use crate::infrastructure::config::{load_dashboard_config, SourceKind, SourceSettings};
use crate::infrastructure::headless_engine::HeadlessEngineFactory;
use crate::infrastructure::http_source::HttpSeriesSource;
use crate::infrastructure::influx_source::InfluxSeriesSource;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

fn build_source(settings: &SourceSettings) -> anyhow::Result<Arc<dyn SeriesSource>> {
    match settings.kind {
        SourceKind::Http => {
            let source = HttpSeriesSource::new(settings.url.clone(), settings.accept_invalid_certs)?;
            tracing::info!("Reading series from {}", source.url());
            Ok(Arc::new(source))
        }
        SourceKind::Influx => {
            let influx = settings
                .influx
                .clone()
                .ok_or_else(|| anyhow::anyhow!("source.kind = \"influx\" requires [source.influx]"))?;
            tracing::info!("Reading series from InfluxDB {} ({})", influx.host, influx.database);
            Ok(Arc::new(InfluxSeriesSource::new(
                influx.host,
                influx.token,
                influx.database,
                influx.query,
            )))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Series source and chart engine (infrastructure layer)
    let source = build_source(&config.source)?;
    let factory = Arc::new(HeadlessEngineFactory::new());

    // Signal chart bound to its mount point (application layer)
    let mut lifecycle = ChartLifecycle::new(
        factory,
        EngineSize::new(config.chart.width, config.chart.height),
    );
    lifecycle.mount(MountPoint::new(config.chart.mount.clone()));
    let chart = SignalChart::new(
        source.clone(),
        lifecycle,
        ExportSettings::new(config.chart.export_name.clone()),
    );

    let state = Arc::new(AppState {
        chart: Mutex::new(chart),
        source,
        mount: config.chart.mount.clone(),
    });

    let router = build_router(state.clone());

    let addr: SocketAddr = config.server.listen.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting signal dashboard on {}", addr);

    // First render once the mount is bound and the shell is listening
    let initial = state.clone();
    tokio::spawn(async move {
        match initial.chart.lock().await.load().await {
            Ok(report) => tracing::info!(
                "Rendered '{}' with {} points (zoom {}..{})",
                report.title,
                report.points,
                report.zoom.start,
                report.zoom.end
            ),
            Err(e) => tracing::error!("Initial chart load failed: {}", e),
        }
    });

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.chart.lock().await.lifecycle_mut().unmount();
    tracing::info!("Signal dashboard stopped");

    Ok(())
}
