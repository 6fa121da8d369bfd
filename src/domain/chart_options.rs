// Chart options - the immutable option value handed to the chart engine
use super::zoom::{DataZoom, ZoomWindow};
use serde::Serialize;
use serde_json::Value;

pub const OUT_OF_RANGE_COLOR: &str = "#999";

/// Value range painted with one color: `gt < value <= lte`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorBand {
    pub gt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
    pub color: &'static str,
}

impl ColorBand {
    const fn new(gt: f64, lte: Option<f64>, color: &'static str) -> Self {
        Self { gt, lte, color }
    }

    pub fn contains(&self, value: f64) -> bool {
        value > self.gt && self.lte.is_none_or(|lte| value <= lte)
    }
}

/// Signal level bands
pub const SIGNAL_BANDS: [ColorBand; 6] = [
    ColorBand::new(0.0, Some(50.0), "#096"),
    ColorBand::new(50.0, Some(100.0), "#ffde33"),
    ColorBand::new(100.0, Some(150.0), "#ff9933"),
    ColorBand::new(150.0, Some(200.0), "#cc0033"),
    ColorBand::new(200.0, Some(300.0), "#660099"),
    ColorBand::new(300.0, None, "#7e0023"),
];

pub fn band_color(value: f64) -> &'static str {
    SIGNAL_BANDS
        .iter()
        .find(|band| band.contains(value))
        .map(|band| band.color)
        .unwrap_or(OUT_OF_RANGE_COLOR)
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub trigger: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct XAxis {
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxis {
    pub split_line: Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Toggle {
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toolbox {
    pub show: bool,
    pub left: &'static str,
    pub feature: ToolboxFeature,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolboxFeature {
    pub data_zoom: ToolboxDataZoom,
    pub restore: Empty,
    pub save_as_image: SaveAsImage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolboxDataZoom {
    pub y_axis_index: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Empty {}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SaveAsImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMap {
    pub top: u32,
    pub right: u32,
    pub pieces: Vec<ColorBand>,
    pub out_of_range: OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutOfRange {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Vec<Option<f64>>,
    pub mark_line: MarkLine,
}

impl LineSeries {
    pub fn new(name: impl Into<String>, data: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            kind: "line",
            data,
            mark_line: MarkLine { silent: true },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkLine {
    pub silent: bool,
}

/// Complete option set for one render. Values are rebuilt per render and
/// replace the engine's state wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: Title,
    pub tooltip: Tooltip,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
    pub toolbox: Toolbox,
    pub data_zoom: DataZoom,
    pub visual_map: VisualMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<LineSeries>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: Title::default(),
            tooltip: Tooltip { trigger: "axis" },
            x_axis: XAxis::default(),
            y_axis: YAxis {
                split_line: Toggle { show: false },
            },
            toolbox: Toolbox {
                show: true,
                left: "center",
                feature: ToolboxFeature {
                    data_zoom: ToolboxDataZoom { y_axis_index: "none" },
                    restore: Empty {},
                    save_as_image: SaveAsImage::default(),
                },
            },
            data_zoom: DataZoom::default(),
            visual_map: VisualMap {
                top: 10,
                right: 10,
                pieces: SIGNAL_BANDS.to_vec(),
                out_of_range: OutOfRange {
                    color: OUT_OF_RANGE_COLOR,
                },
            },
            series: None,
        }
    }
}

impl ChartOptions {
    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.title.text = text.into();
        self
    }

    pub fn with_categories(mut self, data: Vec<Value>) -> Self {
        self.x_axis.data = data;
        self
    }

    pub fn with_series(mut self, series: LineSeries) -> Self {
        self.series = Some(series);
        self
    }

    pub fn with_image_name(mut self, name: impl Into<String>) -> Self {
        self.toolbox.feature.save_as_image.name = Some(name.into());
        self
    }

    pub fn with_data_zoom(mut self, data_zoom: DataZoom) -> Self {
        self.data_zoom = data_zoom;
        self
    }

    pub fn with_zoom_window(mut self, window: ZoomWindow) -> Self {
        self.data_zoom = self.data_zoom.with_window(window);
        self
    }

    /// Toolbox and slider are hidden while the chart is rasterized for
    /// export. The zoom window is left as is.
    pub fn with_export_chrome(mut self, active: bool) -> Self {
        self.toolbox.show = active;
        self.data_zoom.show = active;
        self
    }

    pub fn zoom_window(&self) -> ZoomWindow {
        self.data_zoom.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_band_color_boundaries() {
        assert_eq!(band_color(0.0), OUT_OF_RANGE_COLOR);
        assert_eq!(band_color(0.5), "#096");
        assert_eq!(band_color(50.0), "#096");
        assert_eq!(band_color(50.1), "#ffde33");
        assert_eq!(band_color(150.0), "#ff9933");
        assert_eq!(band_color(300.0), "#660099");
        assert_eq!(band_color(300.01), "#7e0023");
        assert_eq!(band_color(-4.0), OUT_OF_RANGE_COLOR);
        assert_eq!(band_color(f64::NAN), OUT_OF_RANGE_COLOR);
    }

    #[test]
    fn test_serialized_shape() {
        let options = ChartOptions::default()
            .with_title("A")
            .with_categories(vec![json!(0), json!(1)])
            .with_series(LineSeries::new("v", vec![Some(10.0), None]));

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["title"]["text"], "A");
        assert_eq!(value["tooltip"]["trigger"], "axis");
        assert_eq!(value["xAxis"]["data"], json!([0, 1]));
        assert_eq!(value["yAxis"]["splitLine"]["show"], false);
        assert_eq!(value["toolbox"]["feature"]["dataZoom"]["yAxisIndex"], "none");
        assert_eq!(value["series"]["type"], "line");
        assert_eq!(value["series"]["data"], json!([10.0, null]));
        assert_eq!(value["series"]["markLine"]["silent"], true);
        assert_eq!(value["visualMap"]["pieces"].as_array().unwrap().len(), 6);
        assert_eq!(value["visualMap"]["pieces"][5], json!({ "gt": 300.0, "color": "#7e0023" }));
        assert_eq!(value["visualMap"]["outOfRange"]["color"], "#999");
    }

    #[test]
    fn test_export_chrome_keeps_window() {
        let options = ChartOptions::default().with_data_zoom(DataZoom {
            show: true,
            window: ZoomWindow::new(20.0, 80.0),
        });

        let hidden = options.clone().with_export_chrome(false);
        assert!(!hidden.toolbox.show);
        assert!(!hidden.data_zoom.show);
        assert_eq!(hidden.zoom_window(), ZoomWindow::new(20.0, 80.0));

        let shown = hidden.with_export_chrome(true);
        assert_eq!(shown, options);
    }
}
