// Application state for HTTP handlers
use crate::application::series_source::SeriesSource;
use crate::application::signal_chart::SignalChart;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct AppState {
    /// Lifecycle operations run one at a time
    pub chart: Mutex<SignalChart>,
    pub source: Arc<dyn SeriesSource>,
    pub mount: String,
}
