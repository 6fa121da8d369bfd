// Export settings for rasterized chart exports
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub name: String,
    #[serde(default)]
    pub orientation: Orientation,
}

impl ExportSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orientation: Orientation::default(),
        }
    }

    /// File name for a saved image, stamped with the export time
    pub fn image_name<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!("{}_{}", self.name, at.format("%Y%m%d_%H%M%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_image_name() {
        let settings = ExportSettings::new("signal_levels");
        let at = Utc.with_ymd_and_hms(2019, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(settings.image_name(&at), "signal_levels_20190307_140509");
    }

    #[test]
    fn test_orientation_defaults_to_landscape() {
        let settings: ExportSettings = serde_json::from_str(r#"{"name":"snr"}"#).unwrap();
        assert_eq!(settings.orientation, Orientation::Landscape);

        let settings: ExportSettings =
            serde_json::from_str(r#"{"name":"snr","orientation":"portrait"}"#).unwrap();
        assert_eq!(settings.orientation, Orientation::Portrait);
    }
}
