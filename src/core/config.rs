use crate::core::worksheet::RowEntry;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProxyConfig {
    pub base_url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        ProxyConfig {
            base_url: "https://api.allorigins.win/get".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KursConfig {
    pub page_url: String,
}

impl Default for KursConfig {
    fn default() -> Self {
        KursConfig {
            page_url: "https://www.bca.co.id/id/informasi/kurs".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub kurs: KursConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    /// When true, valid rows show their USD projections even before a rate
    /// has been fetched. When false, the worksheet stays empty until a rate
    /// is available.
    #[serde(default = "default_partial_before_rate")]
    pub partial_before_rate: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            partial_before_rate: true,
        }
    }
}

fn default_partial_before_rate() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub worksheet: Vec<RowEntry>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("id", "kalkurs", "kalkurs")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
