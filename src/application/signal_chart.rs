// Signal level chart - fetches series, builds options, drives the lifecycle
use crate::application::chart_lifecycle::{ChartLifecycle, LifecycleError};
use crate::application::series_source::{FetchError, SeriesSource};
use crate::domain::chart_options::{band_color, ChartOptions, LineSeries};
use crate::domain::export::ExportSettings;
use crate::domain::series::{DecodeError, SignalSeries};
use crate::domain::zoom::ZoomWindow;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Summary of one load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub title: String,
    pub points: usize,
    pub rendered: bool,
    pub zoom: ZoomWindow,
    pub latest_band: Option<&'static str>,
}

pub struct SignalChart {
    source: Arc<dyn SeriesSource>,
    lifecycle: ChartLifecycle,
    export_settings: ExportSettings,
}

impl SignalChart {
    pub fn new(
        source: Arc<dyn SeriesSource>,
        lifecycle: ChartLifecycle,
        export_settings: ExportSettings,
    ) -> Self {
        Self {
            source,
            lifecycle,
            export_settings,
        }
    }

    pub fn lifecycle(&self) -> &ChartLifecycle {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut ChartLifecycle {
        &mut self.lifecycle
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export_settings
    }

    /// Store new export settings and restamp the image name on the applied
    /// options, if any
    pub fn set_export_settings(&mut self, export_settings: ExportSettings) {
        self.export_settings = export_settings;
        let Ok(applied) = self.lifecycle.current_options() else {
            return;
        };

        let options = applied
            .clone()
            .with_image_name(self.export_settings.image_name(&Local::now()));
        if let Err(err) = self.lifecycle.apply_options(&options) {
            tracing::warn!("Could not restamp export name: {}", err);
        }
    }

    /// Fetch the series and (re)render the chart. A zoom window the user
    /// chose on the previous render is kept.
    pub async fn load(&mut self) -> Result<LoadReport, ChartError> {
        let nodes = self.source.fetch_series().await?;
        let series = SignalSeries::decode(&nodes)?;
        if series.is_empty() {
            tracing::warn!("Series '{}' has no points", series.title);
        } else {
            tracing::debug!("Decoded series '{}' with {} points", series.title, series.len());
        }

        let options = Self::build_options(&series, &self.export_settings, &Local::now());
        let options = ChartLifecycle::auto_tune_zoom_visibility(options, series.len());
        let options = match self.lifecycle.user_zoom() {
            Some(previous) => ChartLifecycle::preserve_zoom_window(previous, options),
            None => options,
        };

        let rendered = self.lifecycle.initialize(&options);
        if !rendered {
            tracing::warn!("Chart '{}' not mounted, render skipped", series.title);
        }

        let latest_band = series.values.iter().rev().flatten().next().map(|v| band_color(*v));

        Ok(LoadReport {
            title: series.title,
            points: series.values.len(),
            rendered,
            zoom: options.zoom_window(),
            latest_band,
        })
    }

    pub fn build_options(
        series: &SignalSeries,
        export_settings: &ExportSettings,
        at: &DateTime<Local>,
    ) -> ChartOptions {
        ChartOptions::default()
            .with_title(series.title.clone())
            .with_categories(series.categories.clone())
            .with_series(LineSeries::new(series.series_name.clone(), series.values.clone()))
            .with_image_name(export_settings.image_name(at))
    }
}
