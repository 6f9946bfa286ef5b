//! Merge Core plugins into the Harmony native project
//!
//! Each Core plugin contributes one [`PluginsJsonEntry`] derived from its own
//! `oh-package.json5` and `src/main/module.json5`. Its sources are copied into
//! the native project and the entries are registered in the dependency file,
//! the entry build profile and the project build profile.

use capharmony_config::AppConfig;
use capharmony_manifest::{
    read_json5, write_json_tabs, JsonDocument, ModuleDescriptor, OhPackage, PluginsJsonEntry,
    ResolvedPlugin,
};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::errors::HarmonyError;
use crate::fs_utils::{copy_dir_all, ensure_dir};

pub const PLUGINS_JSON: &str = "capacitor.plugins.json";
pub const OH_PACKAGE: &str = "oh-package.json5";
pub const BUILD_PROFILE: &str = "build-profile.json5";
pub const MODULE_DESCRIPTOR: &str = "src/main/module.json5";

/// Module registered for the runtime support library shipped with the platform
pub const RUNTIME_MODULE_NAME: &str = "Capacitor";
pub const RUNTIME_MODULE_DIR: &str = "capacitor";

/// Modules of the native project that plugins must not replace
pub const RESERVED_MODULE_NAMES: [&str; 2] = ["entry", RUNTIME_MODULE_NAME];

/// Reject entries whose module name collides with a reserved module or with
/// another plugin's module
pub fn check_module_names(entries: &[PluginsJsonEntry]) -> Result<(), HarmonyError> {
    for (index, entry) in entries.iter().enumerate() {
        let conflict = |owner: String| HarmonyError::ModuleNameConflict {
            module: entry.module.clone(),
            plugin: entry.plugin.clone(),
            owner,
        };
        if RESERVED_MODULE_NAMES.contains(&entry.module.as_str()) {
            return Err(conflict("the native project".to_string()));
        }
        if let Some(other) = entries[..index].iter().find(|e| e.module == entry.module) {
            return Err(conflict(format!("plugin '{}'", other.plugin)));
        }
    }
    Ok(())
}

/// Derive the registry entry of a plugin from its module descriptors
pub fn plugin_json_entry(plugin: &ResolvedPlugin) -> Result<PluginsJsonEntry, HarmonyError> {
    let src_path = plugin.source_dir();
    let package: OhPackage = read_json5(&src_path.join(OH_PACKAGE))?;
    let module: ModuleDescriptor = read_json5(&src_path.join(MODULE_DESCRIPTOR))?;
    Ok(PluginsJsonEntry::new(&package.name, &module.module.name))
}

/// Where a plugin's sources are copied inside the native project
pub fn plugin_target_dir(config: &AppConfig, plugin: &ResolvedPlugin) -> PathBuf {
    let dir_name = plugin
        .descriptor
        .root_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| plugin.descriptor.id.as_ref().into());
    config.harmony.platform_dir_abs.join(dir_name)
}

/// Copy a plugin's platform sources into the native project
pub fn copy_plugin_sources(config: &AppConfig, plugin: &ResolvedPlugin) -> Result<(), HarmonyError> {
    let target = plugin_target_dir(config, plugin);
    ensure_dir(&target)?;
    copy_dir_all(&plugin.source_dir(), &target)?;
    Ok(())
}

fn entry_file(config: &AppConfig, name: &str) -> PathBuf {
    config.harmony.entry_dir_abs.join(name)
}

/// Path of the generated plugin registry
pub fn plugins_json_path(config: &AppConfig) -> PathBuf {
    config.harmony.config_dir_abs.join(PLUGINS_JSON)
}

fn register_entries(
    entries: &[PluginsJsonEntry],
    dependencies: &mut JsonDocument,
    entry_profile: &mut JsonDocument,
    project_profile: &mut JsonDocument,
) -> Result<(), HarmonyError> {
    for entry in entries {
        dependencies.set_dependency(&entry.plugin, &format!("file:../{}", entry.plugin))?;
        if !entry_profile.add_runtime_only_package(&entry.plugin)? {
            debug!("'{}' already listed in runtimeOnly packages", entry.plugin);
        }
        project_profile.upsert_module(&entry.module, &format!("./{}", entry.plugin))?;
    }
    project_profile.upsert_module(RUNTIME_MODULE_NAME, &format!("./{}", RUNTIME_MODULE_DIR))?;
    Ok(())
}

/// Merge every Core plugin of `plugins` into the native project.
///
/// Non-Core plugins are ignored. Any missing or malformed file aborts the
/// merge; files written before the failure stay written.
pub fn merge_all(
    config: &AppConfig,
    plugins: &[ResolvedPlugin],
) -> Result<Vec<PluginsJsonEntry>, HarmonyError> {
    let core: Vec<&ResolvedPlugin> = plugins.iter().filter(|p| p.is_core()).collect();

    let entries = core
        .iter()
        .map(|plugin| plugin_json_entry(plugin))
        .collect::<Result<Vec<_>, _>>()?;
    check_module_names(&entries)?;

    write_json_tabs(&plugins_json_path(config), &entries)?;

    let mut dependencies = JsonDocument::open_json5(&entry_file(config, OH_PACKAGE))?;
    let mut entry_profile = JsonDocument::open_json5(&entry_file(config, BUILD_PROFILE))?;
    let mut project_profile =
        JsonDocument::open_json5(&config.harmony.platform_dir_abs.join(BUILD_PROFILE))?;

    register_entries(
        &entries,
        &mut dependencies,
        &mut entry_profile,
        &mut project_profile,
    )?;

    for plugin in &core {
        copy_plugin_sources(config, plugin)?;
    }

    dependencies.save()?;
    entry_profile.save()?;
    project_profile.save()?;

    info!(
        "Merged {} plugin(s) into {:?}",
        entries.len(),
        config.harmony.platform_dir_abs
    );
    Ok(entries)
}
