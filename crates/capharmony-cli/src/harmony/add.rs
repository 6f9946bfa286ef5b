//! Scaffold the Harmony native project from the platform template

use capharmony_config::{app_config::PLATFORM_PACKAGE, AppConfig};
use capharmony_logger::run_task;
use tracing::info;

use crate::errors::HarmonyError;
use crate::fs_utils::copy_dir_all;

/// Fail unless the Harmony platform package is installed in `node_modules`
pub fn check_harmony_package(config: &AppConfig) -> Result<(), HarmonyError> {
    if config.platform_package_dir().join("package.json").is_file() {
        Ok(())
    } else {
        Err(HarmonyError::PlatformNotInstalled(PLATFORM_PACKAGE.to_string()))
    }
}

/// Copy the template into the platform directory, which must not exist yet
pub fn install_template(config: &AppConfig) -> Result<usize, HarmonyError> {
    let target = &config.harmony.platform_dir_abs;
    if target.exists() {
        return Err(HarmonyError::PlatformExists(target.clone()));
    }
    let template = &config.harmony.template_dir_abs;
    if !template.is_dir() {
        return Err(HarmonyError::TemplateNotFound(template.clone()));
    }

    let copied = copy_dir_all(template, target)?;
    info!("Installed {} template file(s) into {:?}", copied, target);
    Ok(copied)
}

/// Create the native project for the app
pub fn add_harmony_project(config: &AppConfig) -> Result<(), HarmonyError> {
    check_harmony_package(config)?;
    run_task(
        &format!("Adding native harmony project in {}", config.harmony.name),
        || install_template(config).map(|_| ()),
    )
}
