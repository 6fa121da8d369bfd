// Router for the dashboard shell
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    chart_options, dispose_chart, export_settings, health_check, index, reload_chart,
    resize_chart, series, toggle_export, update_export_settings, zoom_chart,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/series", get(series))
        .route("/chart/options", get(chart_options))
        .route("/chart/reload", post(reload_chart))
        .route("/chart/zoom", post(zoom_chart))
        .route("/chart/resize", post(resize_chart))
        .route("/chart/dispose", post(dispose_chart))
        .route("/chart/export", post(toggle_export))
        .route(
            "/chart/export-settings",
            get(export_settings).put(update_export_settings),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
