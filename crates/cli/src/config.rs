//! CLI configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use casekit_engine::backend::WebDriverConfig;
use casekit_engine::locator::LocatorConfig;
use serde::{Deserialize, Serialize};

/// Toolkit configuration, optionally loaded from `casekit.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CasekitConfig {
    /// Directory scanned for test scripts
    pub testcases_dir: PathBuf,

    /// WebDriver endpoint for UI runs
    pub webdriver_url: String,

    /// Upper bound for the locator title-attribute wait
    pub title_wait_secs: u64,
}

impl Default for CasekitConfig {
    fn default() -> Self {
        Self {
            testcases_dir: casekit_common::default_testcases_dir(),
            webdriver_url: "http://127.0.0.1:4444".to_string(),
            title_wait_secs: 10,
        }
    }
}

impl CasekitConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from the given path, or from `./casekit.toml` when present, or
    /// fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new("casekit.toml");
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn locator_config(&self) -> LocatorConfig {
        LocatorConfig {
            title_wait: Duration::from_secs(self.title_wait_secs),
            ..LocatorConfig::default()
        }
    }

    pub fn webdriver_config(&self, override_url: Option<&str>) -> WebDriverConfig {
        WebDriverConfig {
            endpoint: override_url.unwrap_or(&self.webdriver_url).to_string(),
            ..WebDriverConfig::default()
        }
    }
}
