//! User-level settings for the CLI, stored as TOML
//!
//! The file lives at `~/.config/capharmony/capharmony.toml` unless the
//! `CAPHARMONY_CONFIG` environment variable points elsewhere.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::errors::ConfigError;

/// Environment variable overriding the CLI config location
pub const CONFIG_ENV_VAR: &str = "CAPHARMONY_CONFIG";

/// Keys accepted by `config set`
pub const KNOWN_KEYS: &[&str] = &["template-dir", "platform-dir"];

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Directory holding the native project template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<String>,
    /// Name of the native project directory inside the app root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_dir: Option<String>,
}

impl CliConfig {
    pub fn path() -> Result<PathBuf, ConfigError> {
        // Honor explicit override for tests / isolated runs
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir()
            .ok_or(ConfigError::HomeDirNotFound)?
            .join(".config");

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir().ok_or(ConfigError::HomeDirNotFound)?;

        Ok(base.join("capharmony").join("capharmony.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(CliConfig::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|e| ConfigError::io(&path, e))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "template-dir" => self.template_dir.clone(),
            "platform-dir" => self.platform_dir.clone(),
            _ => None,
        }
    }

    /// Set a known key, returning `false` when the key is not recognized
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "template-dir" => self.template_dir = Some(value),
            "platform-dir" => self.platform_dir = Some(value),
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.template_dir.is_none() && self.platform_dir.is_none()
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        KNOWN_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}
