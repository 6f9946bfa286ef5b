//! Configuration for the capharmony CLI
//!
//! Two sources are handled here:
//! - the app project's `capacitor.config.json`, resolved into [`AppConfig`]
//! - the user-level CLI settings file, [`CliConfig`]

pub mod app_config;
pub mod cli_config;
pub mod errors;

pub use app_config::{AppConfig, HarmonyPaths};
pub use cli_config::CliConfig;
pub use errors::ConfigError;
