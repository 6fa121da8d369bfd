// HTTP request handlers
use crate::application::chart_engine::EngineSize;
use crate::application::chart_lifecycle::LifecycleError;
use crate::application::series_source::FetchError;
use crate::application::signal_chart::{ChartError, LoadReport};
use crate::domain::chart_options::ChartOptions;
use crate::domain::export::ExportSettings;
use crate::domain::series::SeriesNode;
use crate::domain::zoom::ZoomWindow;
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_index;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl ToString) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        let status = match err {
            LifecycleError::InvalidZoom { .. } => StatusCode::BAD_REQUEST,
            LifecycleError::NotInitialized
            | LifecycleError::Disposed => StatusCode::CONFLICT,
        };
        Self::new(status, err)
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, err)
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::Fetch(err) => err.into(),
            ChartError::Decode(err) => Self::new(StatusCode::BAD_GATEWAY, err),
            ChartError::Lifecycle(err) => err.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self.message);
        } else {
            tracing::warn!("{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Deserialize)]
pub struct ExportToggle {
    pub active: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Root view
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index(&state.mount))
}

/// Options currently applied to the engine
pub async fn chart_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartOptions>, ApiError> {
    let chart = state.chart.lock().await;
    match chart.lifecycle().current_options() {
        Ok(options) => Ok(Json(options.clone())),
        Err(LifecycleError::NotInitialized) => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "chart has not been rendered yet",
        )),
        Err(err) => Err(err.into()),
    }
}

pub async fn reload_chart(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LoadReport>, ApiError> {
    let mut chart = state.chart.lock().await;
    let report = chart.load().await?;
    tracing::info!("Reloaded chart '{}' with {} points", report.title, report.points);
    Ok(Json(report))
}

pub async fn zoom_chart(
    State(state): State<Arc<AppState>>,
    Json(window): Json<ZoomWindow>,
) -> Result<StatusCode, ApiError> {
    let mut chart = state.chart.lock().await;
    chart.lifecycle_mut().dispatch_zoom(window)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn resize_chart(
    State(state): State<Arc<AppState>>,
    Json(size): Json<EngineSize>,
) -> Result<Json<EngineSize>, ApiError> {
    let mut chart = state.chart.lock().await;
    chart.lifecycle_mut().resize(size)?;
    Ok(Json(chart.lifecycle().size()))
}

pub async fn dispose_chart(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    let mut chart = state.chart.lock().await;
    chart.lifecycle_mut().dispose()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle export chrome and hand back the options to render
pub async fn toggle_export(
    State(state): State<Arc<AppState>>,
    Json(toggle): Json<ExportToggle>,
) -> Result<Json<ChartOptions>, ApiError> {
    let mut chart = state.chart.lock().await;
    let lifecycle = chart.lifecycle_mut();
    lifecycle.toggle_export_chrome(toggle.active)?;
    Ok(Json(lifecycle.current_options()?.clone()))
}

pub async fn export_settings(State(state): State<Arc<AppState>>) -> Json<ExportSettings> {
    let chart = state.chart.lock().await;
    Json(chart.export_settings().clone())
}

pub async fn update_export_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<ExportSettings>,
) -> Json<ExportSettings> {
    let mut chart = state.chart.lock().await;
    chart.set_export_settings(settings);
    Json(chart.export_settings().clone())
}

/// Raw series, as served by the series endpoint
pub async fn series(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SeriesNode>>, ApiError> {
    Ok(Json(state.source.fetch_series().await?))
}
