use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Month;
use serde::{Deserialize, Serialize};

use crate::model::month::{data_file_name, DEFAULT_YEAR};
use crate::model::summary::DEFAULT_MIN_SOC_THRESHOLD;

const CONFIG_DIR_NAME: &str = ".solarh2";
const CONFIG_FILE_NAME: &str = "config.json";
const EXPORT_DIR_NAME: &str = "exports";

/// Everything the dashboard needs to know, owned by the caller and passed
/// down explicitly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub year: i32,
    pub selected_month: Option<Month>,
    pub min_soc_threshold: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            year: DEFAULT_YEAR,
            selected_month: None,
            min_soc_threshold: DEFAULT_MIN_SOC_THRESHOLD,
        }
    }
}

impl DashboardConfig {
    /// `~/.solarh2/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Reads an explicit config file, or the default one if it exists.
    /// Without either, the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::read(p),
            None => match Self::default_path() {
                Ok(p) if p.exists() => Self::read(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn data_file_name(&self, month: Month) -> String {
        data_file_name(month, self.year)
    }

    /// Default export target, kept out of the scanned data directory.
    pub fn export_path(&self, month: Month) -> PathBuf {
        self.data_dir.join(EXPORT_DIR_NAME).join(self.data_file_name(month))
    }
}
