// Chart engine seam - a rendering engine instance bound to one mount point
use crate::domain::chart_options::ChartOptions;
use crate::domain::zoom::ZoomWindow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named element a chart engine renders into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MountPoint(String);

impl MountPoint {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSize {
    pub width: u32,
    pub height: u32,
}

impl EngineSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

pub trait ChartEngine: Send + Sync {
    fn mount(&self) -> &MountPoint;

    /// Replace the engine's option state (no merge)
    fn set_option(&mut self, options: &ChartOptions);

    fn option(&self) -> Option<&ChartOptions>;

    fn resize(&mut self, size: EngineSize);

    fn size(&self) -> EngineSize;

    /// Zoom window currently displayed, including user interaction
    fn zoom_window(&self) -> Option<ZoomWindow>;

    /// Apply a user zoom interaction
    fn dispatch_zoom(&mut self, window: ZoomWindow);

    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

pub trait EngineFactory: Send + Sync {
    /// Release whatever engine state is bound to the mount point
    fn dispose_mount(&self, mount: &MountPoint);

    fn init(&self, mount: &MountPoint, size: EngineSize) -> Box<dyn ChartEngine>;
}
