use crate::commands::load_app_config;
use crate::errors::HarmonyError;
use crate::harmony::{add_harmony_project, edit_project_identity, update_harmony_project};
use crate::logger;
use crate::GlobalOpts;

/// Scaffold the native project, stamp the identity, then run a first update
pub fn handle_add(opts: &GlobalOpts) -> Result<(), HarmonyError> {
    let config = load_app_config(opts)?;
    add_harmony_project(&config)?;
    edit_project_identity(&config)?;
    update_harmony_project(&config)?;
    logger::success(&format!(
        "Harmony project added in {}",
        config.harmony.platform_dir_abs.display()
    ));
    Ok(())
}

pub fn handle_update(opts: &GlobalOpts) -> Result<(), HarmonyError> {
    let config = load_app_config(opts)?;
    update_harmony_project(&config)
}

pub fn handle_identity(opts: &GlobalOpts) -> Result<(), HarmonyError> {
    let config = load_app_config(opts)?;
    edit_project_identity(&config)
}
