// Zoom window domain model
use serde::{Deserialize, Serialize, Serializer};

/// Series with at least this many points get a zoom slider
pub const SLIDER_MIN_POINTS: usize = 10;
/// Default end bound of the zoom window when the slider is shown
pub const SLIDER_DEFAULT_END: f64 = 35.0;

/// Visible start/end percentage range of the x-axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomWindow {
    pub start: f64,
    pub end: f64,
}

impl ZoomWindow {
    pub const FULL: ZoomWindow = ZoomWindow {
        start: 0.0,
        end: 100.0,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && 0.0 <= self.start
            && self.start <= self.end
            && self.end <= 100.0
    }
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self::FULL
    }
}

/// Zoom control state: slider visibility plus the window it covers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataZoom {
    pub show: bool,
    pub window: ZoomWindow,
}

impl DataZoom {
    /// Small series get no slider and the full range; larger ones get a
    /// slider opened on the first 35%.
    pub fn auto_tuned(self, series_len: usize) -> Self {
        if series_len >= SLIDER_MIN_POINTS {
            Self {
                show: true,
                window: ZoomWindow::new(self.window.start, SLIDER_DEFAULT_END),
            }
        } else {
            Self {
                show: false,
                window: ZoomWindow::FULL,
            }
        }
    }

    pub fn with_window(self, window: ZoomWindow) -> Self {
        Self { window, ..self }
    }
}

#[derive(Serialize)]
struct DataZoomEntry {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    show: Option<bool>,
    start: f64,
    end: f64,
}

// Serialized as the engine's pair of zoom components: the slider and the
// mouse-wheel "inside" zoom, both tracking the same window.
impl Serialize for DataZoom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = [
            DataZoomEntry {
                kind: "slider",
                show: Some(self.show),
                start: self.window.start,
                end: self.window.end,
            },
            DataZoomEntry {
                kind: "inside",
                show: None,
                start: self.window.start,
                end: self.window.end,
            },
        ];
        entries.serialize(serializer)
    }
}
