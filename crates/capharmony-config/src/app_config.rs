//! App project configuration
//!
//! Reads `capacitor.config.json` from the app root and resolves every absolute
//! path the Harmony tooling touches.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli_config::CliConfig;
use crate::errors::ConfigError;

pub const APP_CONFIG_FILE: &str = "capacitor.config.json";
pub const DEFAULT_PLATFORM_DIR: &str = "harmony";
pub const DEFAULT_WEB_DIR: &str = "www";

/// npm package that ships the Harmony platform (template, runtime library)
pub const PLATFORM_PACKAGE: &str = "@capacitor/harmony";
pub const CORE_PACKAGE: &str = "@capacitor/core";

/// Raw shape of `capacitor.config.json`, only the fields we read
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAppConfig {
    app_id: Option<String>,
    app_name: Option<String>,
    web_dir: Option<String>,
    #[serde(default)]
    harmony: RawHarmonyOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHarmonyOptions {
    path: Option<String>,
    template_dir: Option<String>,
}

/// Resolved locations inside the Harmony native project
#[derive(Debug, Clone)]
pub struct HarmonyPaths {
    /// Directory name of the native project relative to the app root
    pub name: String,
    pub platform_dir_abs: PathBuf,
    /// `AppScope`, holds `app.json5` and the app-level string resources
    pub app_dir_abs: PathBuf,
    /// `entry`, the main module
    pub entry_dir_abs: PathBuf,
    /// `entry/src/main/resources`, holds the per-locale string resources
    pub assets_dir_abs: PathBuf,
    /// `entry/src/main/resources/rawfile`, holds generated config files
    pub config_dir_abs: PathBuf,
    /// `entry/src/main/resources/rawfile/public`, the bundled web assets
    pub web_dir_abs: PathBuf,
    pub template_dir_abs: PathBuf,
}

/// Configuration handed to every Harmony operation. Read-only once built.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root_dir: PathBuf,
    pub app_id: String,
    pub app_name: String,
    /// The app's own web build output
    pub web_dir_abs: PathBuf,
    pub node_modules_abs: PathBuf,
    pub harmony: HarmonyPaths,
    /// The config file as read, re-emitted into the native project on copy
    pub raw: Value,
}

impl AppConfig {
    /// Load `capacitor.config.json` from `root_dir`
    pub fn load(root_dir: &Path, cli: &CliConfig) -> Result<Self, ConfigError> {
        let path = root_dir.join(APP_CONFIG_FILE);
        debug!("Loading app config from {:?}", path);
        let content = fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
        let raw: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.clone(),
            source,
        })?;
        Self::from_value(root_dir, raw, cli, &path)
    }

    fn from_value(
        root_dir: &Path,
        raw: Value,
        cli: &CliConfig,
        source_path: &Path,
    ) -> Result<Self, ConfigError> {
        let parsed: RawAppConfig =
            serde_json::from_value(raw.clone()).map_err(|source| ConfigError::Json {
                path: source_path.to_path_buf(),
                source,
            })?;

        let app_id = parsed.app_id.ok_or_else(|| ConfigError::MissingField {
            path: source_path.to_path_buf(),
            field: "appId",
        })?;
        let app_name = parsed.app_name.ok_or_else(|| ConfigError::MissingField {
            path: source_path.to_path_buf(),
            field: "appName",
        })?;

        let node_modules_abs = root_dir.join("node_modules");
        let name = parsed
            .harmony
            .path
            .or_else(|| cli.platform_dir.clone())
            .unwrap_or_else(|| DEFAULT_PLATFORM_DIR.to_string());
        let template_dir_abs = parsed
            .harmony
            .template_dir
            .map(|dir| root_dir.join(dir))
            .or_else(|| cli.template_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| {
                node_modules_abs
                    .join(PLATFORM_PACKAGE)
                    .join("harmony-template")
            });

        let platform_dir_abs = root_dir.join(&name);
        let entry_dir_abs = platform_dir_abs.join("entry");
        let assets_dir_abs = entry_dir_abs.join("src").join("main").join("resources");
        let config_dir_abs = assets_dir_abs.join("rawfile");
        let harmony = HarmonyPaths {
            name,
            app_dir_abs: platform_dir_abs.join("AppScope"),
            web_dir_abs: config_dir_abs.join("public"),
            platform_dir_abs,
            entry_dir_abs,
            assets_dir_abs,
            config_dir_abs,
            template_dir_abs,
        };

        Ok(AppConfig {
            root_dir: root_dir.to_path_buf(),
            app_id,
            app_name,
            web_dir_abs: root_dir.join(
                parsed
                    .web_dir
                    .unwrap_or_else(|| DEFAULT_WEB_DIR.to_string()),
            ),
            node_modules_abs,
            harmony,
            raw,
        })
    }

    /// Root of the installed Harmony platform package
    pub fn platform_package_dir(&self) -> PathBuf {
        self.node_modules_abs.join(PLATFORM_PACKAGE)
    }
}
