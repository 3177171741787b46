use serde::Deserialize;
use std::path::PathBuf;

fn default_verbose() -> bool {
    false
}
fn default_json() -> bool {
    false
}
fn default_plot_width() -> f64 {
    800.0
}
fn default_plot_height() -> f64 {
    600.0
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Coordinate CSV to load when no points are given on the command line
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Directory that default-named exports are written into
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default = "default_json")]
    pub json: bool,
    #[serde(default)]
    pub plot: Option<PlotConfig>,
    #[serde(default)]
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlotConfig {
    #[serde(default = "default_plot_width")]
    pub width: f64,
    #[serde(default = "default_plot_height")]
    pub height: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_plot_width(),
            height: default_plot_height(),
        }
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    2
}

/// Settings for the narrative report generator
#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Falls back to `GEMINI_API_KEY`, then `API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ReportConfig {
    /// Configured key, or the first non-empty key from the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                ["GEMINI_API_KEY", "API_KEY"]
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|k| !k.trim().is_empty())
            })
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        log::debug!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("landcal.toml"));
    paths.push(PathBuf::from(".landcal.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("landcal").join("config.toml"));
        paths.push(config_dir.join("landcal.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".landcal.toml"));
        paths.push(home.join(".config").join("landcal").join("config.toml"));
    }

    paths
}
