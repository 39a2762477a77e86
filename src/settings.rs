use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpendError};
use crate::loader::{LoaderConfig, DEFAULT_DATE_FORMATS, DEFAULT_TAGS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    /// Pie chart slices smaller than this are grouped under "Other".
    #[serde(default = "default_other_limit")]
    pub other_limit: f64,
}

fn default_data_file() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("spendview")
        .join("transactions.csv")
        .to_string_lossy()
        .to_string()
}

fn default_tags() -> Vec<String> {
    DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()
}

fn default_date_formats() -> Vec<String> {
    DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
}

fn default_other_limit() -> f64 {
    300.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            tags: default_tags(),
            date_formats: default_date_formats(),
            other_limit: default_other_limit(),
        }
    }
}

impl Settings {
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            tags: self.tags.clone(),
            date_formats: self.date_formats.clone(),
        }
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand_path(&self.data_file))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("spendview")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {e}", path.display());
                Settings::default()
            }
        }
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| SpendError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

/// Expand a leading `~` to the home directory.
pub fn shellexpand_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}
