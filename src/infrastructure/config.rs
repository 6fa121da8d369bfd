// Dashboard configuration
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Http,
    Influx,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_source_url")]
    pub url: String,
    /// The series server ships a self-signed certificate
    #[serde(default)]
    pub accept_invalid_certs: bool,
    pub influx: Option<InfluxSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub host: String,
    #[serde(default)]
    pub token: String,
    pub database: String,
    #[serde(default = "default_influx_query")]
    pub query: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_mount")]
    pub mount: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_export_name")]
    pub export_name: String,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_source_url() -> String {
    "https://localhost:8443/".to_string()
}

fn default_influx_query() -> String {
    "select * from StatSta".to_string()
}

fn default_mount() -> String {
    "signal-graph".to_string()
}

fn default_width() -> u32 {
    960
}

fn default_height() -> u32 {
    320
}

fn default_export_name() -> String {
    "signal_levels".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            url: default_source_url(),
            accept_invalid_certs: false,
            influx: None,
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            mount: default_mount(),
            width: default_width(),
            height: default_height(),
            export_name: default_export_name(),
        }
    }
}

/// `DASHBOARD__SECTION__KEY` overrides, e.g. `DASHBOARD__CHART__WIDTH`
fn dashboard_environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD").separator("__")
}

/// Load `config/dashboard.*` if present, then `DASHBOARD__*` overrides
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(dashboard_environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}
