//! Command handlers invoked by the binary

pub mod config;
pub mod plugins;
pub mod project;

use capharmony_config::{AppConfig, CliConfig};

use crate::errors::HarmonyError;
use crate::GlobalOpts;

/// Load the app configuration for the project selected by `opts`
pub fn load_app_config(opts: &GlobalOpts) -> Result<AppConfig, HarmonyError> {
    let root = opts.project_root()?;
    let cli = CliConfig::load()?;
    Ok(AppConfig::load(&root, &cli)?)
}
