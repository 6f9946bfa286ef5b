//! Stamp the app identity into the Harmony native project
//!
//! Four independent rewrites, none transactional with respect to the others:
//! the bundle name in `AppScope/app.json5`, the app-level `app_name` string and
//! the `CareAbility_label` string of each locale present in the entry module.

use capharmony_config::AppConfig;
use capharmony_manifest::JsonDocument;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::HarmonyError;

pub const APP_JSON5: &str = "app.json5";
pub const STRING_RESOURCES: &str = "element/string.json";
pub const APP_NAME_KEY: &str = "app_name";
pub const ABILITY_LABEL_KEY: &str = "CareAbility_label";

/// Locale folders of the entry module that carry the ability label
pub const LABEL_LOCALES: [&str; 3] = ["base", "en_US", "zh_CN"];

/// Escape the app name for the native string resources.
///
/// `&` becomes `&amp;`, `<` becomes `&lt;`, quotes are backslash-escaped.
pub fn sanitize_app_name(name: &str) -> String {
    name.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "\\\"")
        .replace('\'', "\\'")
}

fn app_strings_path(config: &AppConfig) -> PathBuf {
    config
        .harmony
        .app_dir_abs
        .join("resources")
        .join("base")
        .join(STRING_RESOURCES)
}

fn locale_strings_path(config: &AppConfig, locale: &str) -> PathBuf {
    config.harmony.assets_dir_abs.join(locale).join(STRING_RESOURCES)
}

fn set_string(path: &Path, key: &str, value: &str) -> Result<(), HarmonyError> {
    let mut strings = JsonDocument::open_json(path)?;
    if !strings.set_string_resource(key, value)? {
        debug!("No '{}' string in {:?}, left unchanged", key, path);
    }
    strings.save()?;
    Ok(())
}

/// Write the configured app id and app name into the native project
pub fn apply_identity(config: &AppConfig) -> Result<(), HarmonyError> {
    let app_name = sanitize_app_name(&config.app_name);

    let mut app_json = JsonDocument::open_json5(&config.harmony.app_dir_abs.join(APP_JSON5))?;
    app_json.set_bundle_name(&config.app_id)?;
    app_json.save()?;

    set_string(&app_strings_path(config), APP_NAME_KEY, &app_name)?;

    for locale in LABEL_LOCALES {
        let path = locale_strings_path(config, locale);
        if !path.exists() {
            debug!("Skipping missing locale resources {:?}", path);
            continue;
        }
        set_string(&path, ABILITY_LABEL_KEY, &app_name)?;
    }

    Ok(())
}
