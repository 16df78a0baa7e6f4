use crate::domain::record::Metric;
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const APP_CONFIG: &str = "config/app";
const WIDGETS_CONFIG: &str = "config/widgets.toml";
const DEFAULT_WIDGETS: &str = include_str!("../../config/widgets.toml");

pub const DEFAULT_OUTPUT: &str = "india_diabetes_master.csv";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub generation: GenerationSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationSettings {
    pub output: PathBuf,
    #[serde(default)]
    pub observations: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub addr: String,
    pub dataset: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetsConfig {
    pub title: String,
    #[serde(default)]
    pub default_states: Vec<String>,
    #[serde(default)]
    pub tiles: Vec<TileConfig>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
    pub report: ReportTemplates,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TileAggregate {
    /// Sum of `metric` over the selected year
    Sum,
    /// Number of states in the whole dataset
    DistinctStates,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TileConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub caption: String,
    pub precision: usize,
    pub aggregate: TileAggregate,
    #[serde(default)]
    pub metric: Option<Metric>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartScope {
    /// One point per state for the selected year
    Year,
    /// One series per selected state across all years
    Trend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: String,
    pub scope: ChartScope,
    pub metric: Metric,
    #[serde(default)]
    pub color_metric: Option<Metric>,
    #[serde(default)]
    pub sort_ascending: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportTemplates {
    pub critical_alert: String,
    pub hidden_burden: String,
    pub fastest_growing: String,
    pub mixed_trends: String,
    pub outlook: String,
}

/// Built-in defaults, then `config/app.*`, then `DIABETES_MONITOR__SECTION__KEY`
/// environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("generation.output", DEFAULT_OUTPUT)?
        .set_default("server.addr", "0.0.0.0:8080")?
        .set_default("server.dataset", DEFAULT_OUTPUT)?
        .add_source(File::with_name(APP_CONFIG).required(false))
        .add_source(Environment::with_prefix("DIABETES_MONITOR").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `config/widgets.toml` when present, the built-in layout otherwise
pub fn load_widgets_config() -> anyhow::Result<WidgetsConfig> {
    if !Path::new(WIDGETS_CONFIG).exists() {
        return default_widgets_config();
    }

    tracing::info!("Loading widgets from {}", WIDGETS_CONFIG);
    let settings = config::Config::builder()
        .add_source(File::new(WIDGETS_CONFIG, FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// The layout shipped in `config/widgets.toml`, compiled in
pub fn default_widgets_config() -> anyhow::Result<WidgetsConfig> {
    let settings = config::Config::builder()
        .add_source(File::from_str(DEFAULT_WIDGETS, FileFormat::Toml))
        .build()?;
    Ok(settings.try_deserialize()?)
}

/// Replace `${key}` placeholders in a template string
pub fn prepare_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
