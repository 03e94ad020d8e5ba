use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Defaults, then `config.toml`, then `INTERN_*` variables, then flags.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let mut settings = match Self::default_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        settings.apply_overrides(overrides);
        Ok(settings)
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "intern").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("INTERN_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(level) = var("INTERN_LOG").filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.api_url {
            self.api_base_url = url.clone();
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = Some(secs);
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}

/// Where the interactive form writes its log.
pub fn log_path() -> PathBuf {
    match directories::ProjectDirs::from("", "", "intern") {
        Some(dirs) => dirs.data_dir().join("intern.log"),
        None => PathBuf::from("intern.log"),
    }
}
