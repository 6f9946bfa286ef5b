//! Harmony native project operations
//!
//! - `add`: scaffold the native project from the platform template
//! - `resolver`: classify installed plugins for the platform
//! - `merger`: merge Core plugins into the native manifests
//! - `settings`: stamp the app id and name into the native project
//! - `update`: the full plugin/runtime/web-asset update flow

pub mod add;
pub mod merger;
pub mod resolver;
pub mod settings;
pub mod update;

#[cfg(test)]
pub(crate) mod test_support;

use capharmony_config::AppConfig;
use capharmony_logger::run_task;

use crate::errors::HarmonyError;

pub use add::{add_harmony_project, check_harmony_package};
pub use merger::merge_all;
pub use resolver::{plugins_of_type, resolve_all, resolve_plugin};
pub use settings::{apply_identity, sanitize_app_name};
pub use update::update_harmony_project;

/// Write the app id and name into the native project behind a spinner
pub fn edit_project_identity(config: &AppConfig) -> Result<(), HarmonyError> {
    run_task("Updating Harmony project identity", || {
        apply_identity(config)
    })
}
