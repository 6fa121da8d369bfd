// In-process chart engine. Holds the option state per mount point; the
// browser page renders whatever option set is current.
use crate::application::chart_engine::{ChartEngine, EngineFactory, EngineSize, MountPoint};
use crate::domain::chart_options::ChartOptions;
use crate::domain::zoom::ZoomWindow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug)]
pub struct HeadlessEngine {
    mount: MountPoint,
    size: EngineSize,
    option: Option<ChartOptions>,
    disposed: Arc<AtomicBool>,
}

impl ChartEngine for HeadlessEngine {
    fn mount(&self) -> &MountPoint {
        &self.mount
    }

    fn set_option(&mut self, options: &ChartOptions) {
        self.option = Some(options.clone());
    }

    fn option(&self) -> Option<&ChartOptions> {
        self.option.as_ref()
    }

    fn resize(&mut self, size: EngineSize) {
        self.size = size;
    }

    fn size(&self) -> EngineSize {
        self.size
    }

    fn zoom_window(&self) -> Option<ZoomWindow> {
        self.option.as_ref().map(ChartOptions::zoom_window)
    }

    fn dispatch_zoom(&mut self, window: ZoomWindow) {
        if let Some(option) = self.option.take() {
            self.option = Some(option.with_zoom_window(window));
        }
    }

    fn dispose(&mut self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.option = None;
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

/// Creates headless engines and tracks which one owns each mount point
#[derive(Debug, Default)]
pub struct HeadlessEngineFactory {
    mounts: Mutex<HashMap<MountPoint, Arc<AtomicBool>>>,
}

impl HeadlessEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_bound(&self, mount: &MountPoint) -> bool {
        let mounts = self.mounts.lock().unwrap_or_else(PoisonError::into_inner);
        mounts
            .get(mount)
            .is_some_and(|disposed| !disposed.load(Ordering::SeqCst))
    }
}

impl EngineFactory for HeadlessEngineFactory {
    fn dispose_mount(&self, mount: &MountPoint) {
        let mut mounts = self.mounts.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(disposed) = mounts.remove(mount) {
            tracing::debug!("Disposing engine state on mount {}", mount);
            disposed.store(true, Ordering::SeqCst);
        }
    }

    fn init(&self, mount: &MountPoint, size: EngineSize) -> Box<dyn ChartEngine> {
        let disposed = Arc::new(AtomicBool::new(false));
        let mut mounts = self.mounts.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = mounts.insert(mount.clone(), disposed.clone()) {
            previous.store(true, Ordering::SeqCst);
        }

        tracing::debug!("Initialized engine on mount {} ({}x{})", mount, size.width, size.height);
        Box::new(HeadlessEngine {
            mount: mount.clone(),
            size,
            option: None,
            disposed,
        })
    }
}
