use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    common::DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    common::DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    common::DEFAULT_PAGE_SIZE
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Detect file type by extension and load
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "yaml" | "yml" => Self::from_yaml_file(path),
            "toml" => Self::from_toml_file(path),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format. Use .yaml, .yml, or .toml"
            )),
        }
    }

    /// Merge with another config, preferring values from other
    pub fn merge(&mut self, other: Config) {
        self.api.base_url = other.api.base_url;
        self.api.timeout_secs = other.api.timeout_secs;
        self.display.page_size = other.display.page_size;
    }

    /// Effective config: defaults, overlaid with the explicit file if one
    /// was passed, otherwise with the user config file if it exists.
    pub fn load(explicit: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        if let Some(path) = explicit {
            config.merge(Config::from_file(path)?);
        } else if let Some(path) = Self::user_config_path() {
            if path.exists() {
                config.merge(Config::from_file(&path)?);
            }
        }
        config.validate()?;
        Ok(config)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jobdash").join("config.yaml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.display.page_size == 0 {
            anyhow::bail!("display.page_size must be greater than zero");
        }
        Ok(())
    }
}
