// Chart lifecycle - owns the engine bound to a mount point
use crate::application::chart_engine::{ChartEngine, EngineFactory, EngineSize, MountPoint};
use crate::domain::chart_options::ChartOptions;
use crate::domain::zoom::ZoomWindow;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LifecycleError {
    #[error("chart has not been initialized")]
    NotInitialized,

    #[error("chart engine has been disposed")]
    Disposed,

    #[error("invalid zoom window {start}..{end}")]
    InvalidZoom { start: f64, end: f64 },
}

/// Every operation that touches the engine checks it is live first; a
/// disposed engine is never mutated.
pub struct ChartLifecycle {
    factory: Arc<dyn EngineFactory>,
    mount: Option<MountPoint>,
    size: EngineSize,
    engine: Option<Box<dyn ChartEngine>>,
    /// Last window set through `dispatch_zoom`, while the engine still shows it
    user_zoom: Option<ZoomWindow>,
}

impl ChartLifecycle {
    pub fn new(factory: Arc<dyn EngineFactory>, size: EngineSize) -> Self {
        Self {
            factory,
            mount: None,
            size,
            engine: None,
            user_zoom: None,
        }
    }

    pub fn mount(&mut self, mount: MountPoint) {
        tracing::debug!("Binding chart to mount {}", mount);
        self.mount = Some(mount);
    }

    /// Unbind the mount point, disposing the live engine if any
    pub fn unmount(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            if !engine.is_disposed() {
                engine.dispose();
            }
        }
        self.user_zoom = None;
        if let Some(mount) = self.mount.take() {
            self.factory.dispose_mount(&mount);
            tracing::debug!("Unbound chart from mount {}", mount);
        }
    }

    pub fn size(&self) -> EngineSize {
        self.size
    }

    /// Dispose prior engine state on the mount point, create a fresh engine
    /// and apply `options`. Returns `false` without doing anything when no
    /// mount point is bound.
    pub fn initialize(&mut self, options: &ChartOptions) -> bool {
        let Some(mount) = self.mount.as_ref() else {
            tracing::debug!("Chart not mounted, skipping initialization");
            return false;
        };

        if let Some(mut previous) = self.engine.take() {
            if previous.mount() != mount && !previous.is_disposed() {
                previous.dispose();
            }
        }
        self.factory.dispose_mount(mount);

        let mut engine = self.factory.init(mount, self.size);
        engine.set_option(options);
        tracing::info!("Chart initialized on mount {}", mount);
        self.engine = Some(engine);
        self.keep_user_zoom_if_applied(options);
        true
    }

    fn live_engine(&self) -> Result<&dyn ChartEngine, LifecycleError> {
        let engine = self.engine.as_deref().ok_or(LifecycleError::NotInitialized)?;
        if engine.is_disposed() {
            return Err(LifecycleError::Disposed);
        }
        Ok(engine)
    }

    fn live_engine_mut(&mut self) -> Result<&mut dyn ChartEngine, LifecycleError> {
        let engine = self
            .engine
            .as_deref_mut()
            .ok_or(LifecycleError::NotInitialized)?;
        if engine.is_disposed() {
            return Err(LifecycleError::Disposed);
        }
        Ok(engine)
    }

    /// Replace the engine's options wholesale
    pub fn apply_options(&mut self, options: &ChartOptions) -> Result<(), LifecycleError> {
        self.live_engine_mut()?.set_option(options);
        self.keep_user_zoom_if_applied(options);
        Ok(())
    }

    fn keep_user_zoom_if_applied(&mut self, options: &ChartOptions) {
        self.user_zoom = self.user_zoom.filter(|w| *w == options.zoom_window());
    }

    pub fn resize(&mut self, size: EngineSize) -> Result<(), LifecycleError> {
        let engine = self.live_engine_mut()?;
        let previous = engine.size();
        engine.resize(size);
        tracing::debug!(
            "Resized chart from {}x{} to {}x{}",
            previous.width,
            previous.height,
            size.width,
            size.height
        );
        self.size = size;
        Ok(())
    }

    pub fn dispose(&mut self) -> Result<(), LifecycleError> {
        self.live_engine_mut()?.dispose();
        self.user_zoom = None;
        tracing::info!("Chart disposed");
        Ok(())
    }

    pub fn current_options(&self) -> Result<&ChartOptions, LifecycleError> {
        self.live_engine()?
            .option()
            .ok_or(LifecycleError::NotInitialized)
    }

    /// Zoom window of the live engine, if there is one
    pub fn zoom_snapshot(&self) -> Option<ZoomWindow> {
        self.live_engine().ok().and_then(|e| e.zoom_window())
    }

    /// Zoom window the user chose on the live engine. Windows that only
    /// came from built options (auto-tune defaults) are not reported.
    pub fn user_zoom(&self) -> Option<ZoomWindow> {
        self.zoom_snapshot().and(self.user_zoom)
    }

    pub fn dispatch_zoom(&mut self, window: ZoomWindow) -> Result<(), LifecycleError> {
        if !window.is_valid() {
            return Err(LifecycleError::InvalidZoom {
                start: window.start,
                end: window.end,
            });
        }
        self.live_engine_mut()?.dispatch_zoom(window);
        self.user_zoom = Some(window);
        Ok(())
    }

    /// Carry a previous zoom window over into freshly built options
    pub fn preserve_zoom_window(previous: ZoomWindow, options: ChartOptions) -> ChartOptions {
        options.with_zoom_window(previous)
    }

    pub fn auto_tune_zoom_visibility(options: ChartOptions, series_len: usize) -> ChartOptions {
        let data_zoom = options.data_zoom.auto_tuned(series_len);
        options.with_data_zoom(data_zoom)
    }

    /// Show or hide toolbox and slider on the applied options and reapply
    pub fn toggle_export_chrome(&mut self, active: bool) -> Result<(), LifecycleError> {
        let options = self.current_options()?.clone().with_export_chrome(active);
        self.apply_options(&options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::headless_engine::HeadlessEngineFactory;

    fn mounted() -> ChartLifecycle {
        let mut lifecycle = ChartLifecycle::new(
            Arc::new(HeadlessEngineFactory::new()),
            EngineSize::new(960, 320),
        );
        lifecycle.mount(MountPoint::new("signal-graph"));
        lifecycle
    }

    #[test]
    fn test_initialize_unmounted_is_noop() {
        let mut lifecycle = ChartLifecycle::new(
            Arc::new(HeadlessEngineFactory::new()),
            EngineSize::new(960, 320),
        );
        assert!(!lifecycle.initialize(&ChartOptions::default()));
        assert_eq!(lifecycle.zoom_snapshot(), None);
        assert_eq!(
            lifecycle.current_options().unwrap_err(),
            LifecycleError::NotInitialized
        );
    }

    #[test]
    fn test_initialize_applies_options() {
        let mut lifecycle = mounted();
        assert!(lifecycle.initialize(&ChartOptions::default().with_title("A")));
        assert_eq!(lifecycle.current_options().unwrap().title.text, "A");
    }

    #[test]
    fn test_reinitialize_disposes_previous_mount_state() {
        let factory = Arc::new(HeadlessEngineFactory::new());
        let mount = MountPoint::new("shared");
        let stale = factory.init(&mount, EngineSize::new(1, 1));

        let mut lifecycle = ChartLifecycle::new(factory.clone(), EngineSize::new(1, 1));
        lifecycle.mount(mount);
        lifecycle.initialize(&ChartOptions::default());

        assert!(stale.is_disposed());
        assert!(lifecycle.current_options().is_ok());
    }

    #[test]
    fn test_operations_after_dispose_fail_without_mutation() {
        let mut lifecycle = mounted();
        lifecycle.initialize(&ChartOptions::default().with_title("before"));
        lifecycle.dispose().unwrap();

        let err = lifecycle.apply_options(&ChartOptions::default().with_title("after"));
        assert_eq!(err, Err(LifecycleError::Disposed));
        assert_eq!(
            lifecycle.resize(EngineSize::new(10, 10)),
            Err(LifecycleError::Disposed)
        );
        assert_eq!(lifecycle.size(), EngineSize::new(960, 320));
        assert_eq!(
            lifecycle.dispatch_zoom(ZoomWindow::new(20.0, 80.0)),
            Err(LifecycleError::Disposed)
        );
        assert_eq!(lifecycle.dispose(), Err(LifecycleError::Disposed));
        assert_eq!(lifecycle.toggle_export_chrome(false), Err(LifecycleError::Disposed));
        assert_eq!(lifecycle.zoom_snapshot(), None);
    }

    #[test]
    fn test_initialize_after_dispose_recovers() {
        let mut lifecycle = mounted();
        lifecycle.initialize(&ChartOptions::default());
        lifecycle.dispose().unwrap();

        assert!(lifecycle.initialize(&ChartOptions::default().with_title("again")));
        assert_eq!(lifecycle.current_options().unwrap().title.text, "again");
    }

    #[test]
    fn test_zoom_snapshot_tracks_interaction() {
        let mut lifecycle = mounted();
        lifecycle.initialize(&ChartOptions::default());
        assert_eq!(lifecycle.zoom_snapshot(), Some(ZoomWindow::FULL));

        lifecycle.dispatch_zoom(ZoomWindow::new(20.0, 80.0)).unwrap();
        assert_eq!(lifecycle.zoom_snapshot(), Some(ZoomWindow::new(20.0, 80.0)));
    }

    #[test]
    fn test_user_zoom_only_reports_dispatched_window() {
        let mut lifecycle = mounted();
        lifecycle.initialize(&ChartOptions::default());
        assert_eq!(lifecycle.user_zoom(), None);

        lifecycle.dispatch_zoom(ZoomWindow::new(20.0, 80.0)).unwrap();
        assert_eq!(lifecycle.user_zoom(), Some(ZoomWindow::new(20.0, 80.0)));

        let kept = ChartOptions::default().with_zoom_window(ZoomWindow::new(20.0, 80.0));
        lifecycle.initialize(&kept);
        assert_eq!(lifecycle.user_zoom(), Some(ZoomWindow::new(20.0, 80.0)));

        lifecycle.apply_options(&ChartOptions::default()).unwrap();
        assert_eq!(lifecycle.user_zoom(), None);

        lifecycle.dispatch_zoom(ZoomWindow::new(5.0, 50.0)).unwrap();
        lifecycle.dispose().unwrap();
        assert_eq!(lifecycle.user_zoom(), None);
        lifecycle.initialize(&ChartOptions::default().with_zoom_window(ZoomWindow::new(5.0, 50.0)));
        assert_eq!(lifecycle.user_zoom(), None);
    }

    #[test]
    fn test_dispatch_zoom_rejects_invalid_window() {
        let mut lifecycle = mounted();
        lifecycle.initialize(&ChartOptions::default());
        assert_eq!(
            lifecycle.dispatch_zoom(ZoomWindow::new(90.0, 10.0)),
            Err(LifecycleError::InvalidZoom {
                start: 90.0,
                end: 10.0
            })
        );
    }

    #[test]
    fn test_preserve_zoom_window() {
        let options = ChartOptions::default();
        let options = ChartLifecycle::preserve_zoom_window(ZoomWindow::new(20.0, 80.0), options);
        assert_eq!(options.zoom_window(), ZoomWindow::new(20.0, 80.0));
    }

    #[test]
    fn test_auto_tune_zoom_visibility() {
        let large = ChartLifecycle::auto_tune_zoom_visibility(ChartOptions::default(), 12);
        assert!(large.data_zoom.show);
        assert_eq!(large.zoom_window().end, 35.0);

        let small = ChartLifecycle::auto_tune_zoom_visibility(ChartOptions::default(), 3);
        assert!(!small.data_zoom.show);
        assert_eq!(small.zoom_window(), ZoomWindow::FULL);
    }

    #[test]
    fn test_toggle_export_chrome() {
        let mut lifecycle = mounted();
        let options = ChartLifecycle::auto_tune_zoom_visibility(ChartOptions::default(), 20);
        lifecycle.initialize(&options);
        lifecycle.dispatch_zoom(ZoomWindow::new(10.0, 30.0)).unwrap();

        lifecycle.toggle_export_chrome(false).unwrap();
        let applied = lifecycle.current_options().unwrap();
        assert!(!applied.toolbox.show);
        assert!(!applied.data_zoom.show);
        assert_eq!(applied.zoom_window(), ZoomWindow::new(10.0, 30.0));

        lifecycle.toggle_export_chrome(true).unwrap();
        let applied = lifecycle.current_options().unwrap();
        assert!(applied.toolbox.show);
        assert!(applied.data_zoom.show);
    }

    #[test]
    fn test_unmount_disposes_engine() {
        let mut lifecycle = mounted();
        lifecycle.initialize(&ChartOptions::default());
        lifecycle.unmount();

        assert_eq!(
            lifecycle.current_options().unwrap_err(),
            LifecycleError::NotInitialized
        );
        assert!(!lifecycle.initialize(&ChartOptions::default()));
    }
}
