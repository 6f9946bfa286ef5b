//! Update the Harmony native project after plugin or web changes

use capharmony_config::{
    app_config::{APP_CONFIG_FILE, CORE_PACKAGE, PLATFORM_PACKAGE},
    AppConfig,
};
use capharmony_logger::{self as logger, run_task};
use capharmony_manifest::{
    discover_plugins, installed_version, write_json_pretty, Platform, PluginType, ResolvedPlugin,
};
use colored::Colorize;
use tracing::debug;

use crate::errors::HarmonyError;
use crate::fs_utils::{copy_dir_all, ensure_dir};
use crate::harmony::add::check_harmony_package;
use crate::harmony::merger::{merge_all, RUNTIME_MODULE_DIR};
use crate::harmony::resolver::{plugins_of_type, resolve_all};

/// Directory of the runtime support library inside the platform package
pub const RUNTIME_LIBRARY_DIR: &str = "capacitor";

/// Discover installed plugins and resolve them for Harmony
pub fn resolve_installed_plugins(config: &AppConfig) -> Result<Vec<ResolvedPlugin>, HarmonyError> {
    let descriptors = discover_plugins(&config.root_dir, &config.node_modules_abs)?;
    Ok(resolve_all(&descriptors, Platform::Harmony))
}

/// Human-readable report of `plugins`, `None` when there is nothing to report
pub fn plugin_report(plugins: &[ResolvedPlugin], platform: Platform, kind: PluginType) -> Option<String> {
    if plugins.is_empty() {
        return None;
    }
    let header = match kind {
        PluginType::Incompatible => format!(
            "Found {} incompatible plugin(s) for {}, skipped install:",
            plugins.len(),
            platform
        ),
        PluginType::Cordova => format!(
            "Found {} Cordova plugin(s) for {}:",
            plugins.len(),
            platform
        ),
        PluginType::Core => format!(
            "Found {} Capacitor plugin(s) for {}:",
            plugins.len(),
            platform
        ),
    };
    let mut lines = vec![header];
    for plugin in plugins {
        lines.push(format!(
            "    {}@{}",
            plugin.descriptor.id,
            plugin.descriptor.version
        ));
    }
    Some(lines.join("\n"))
}

fn print_plugins(plugins: &[ResolvedPlugin], kind: PluginType) {
    let Some(report) = plugin_report(plugins, Platform::Harmony, kind) else {
        return;
    };
    logger::step(&report);
    if logger::get_no_stdout() {
        return;
    }
    match kind {
        PluginType::Incompatible => println!("{}", report.yellow()),
        _ => println!("{}", report),
    }
}

/// Copy the platform's runtime library into the native project
pub fn copy_runtime_library(config: &AppConfig) -> Result<usize, HarmonyError> {
    let source = config.platform_package_dir().join(RUNTIME_LIBRARY_DIR);
    if !source.is_dir() {
        return Err(HarmonyError::RuntimeLibraryNotFound(source));
    }
    let target = config.harmony.platform_dir_abs.join(RUNTIME_MODULE_DIR);
    ensure_dir(&target)?;
    copy_dir_all(&source, &target)
}

/// Copy the app's web build into the native project and emit its config file
pub fn copy_web_assets(config: &AppConfig) -> Result<usize, HarmonyError> {
    if !config.web_dir_abs.is_dir() {
        return Err(HarmonyError::WebDirNotFound(config.web_dir_abs.clone()));
    }
    let copied = copy_dir_all(&config.web_dir_abs, &config.harmony.web_dir_abs)?;
    ensure_dir(&config.harmony.config_dir_abs)?;
    write_json_pretty(
        &config.harmony.config_dir_abs.join(APP_CONFIG_FILE),
        &config.raw,
    )?;
    Ok(copied)
}

fn major_version(version: &str) -> Option<u64> {
    let trimmed = version.trim_start_matches(|c: char| !c.is_ascii_digit());
    trimmed.split('.').next()?.parse().ok()
}

/// Warn when the installed core and platform packages disagree on the major
/// version. Returns `true` when they agree or either one is missing.
pub fn check_platform_versions(config: &AppConfig) -> bool {
    let core = installed_version(&config.node_modules_abs, CORE_PACKAGE);
    let platform = installed_version(&config.node_modules_abs, PLATFORM_PACKAGE);
    let (Some(core), Some(platform)) = (core, platform) else {
        debug!("Skipping version check, core or platform package not installed");
        return true;
    };

    if major_version(&core) == major_version(&platform) {
        return true;
    }
    logger::warn(&format!(
        "{}@{} major version mismatch with {}@{}. Update both packages to the same major version",
        PLATFORM_PACKAGE, platform, CORE_PACKAGE, core
    ));
    false
}

/// Run the full update: plugins, runtime library, manifests, web assets
pub fn update_harmony_project(config: &AppConfig) -> Result<(), HarmonyError> {
    check_harmony_package(config)?;

    let plugins = run_task("Updating Harmony plugins", || {
        resolve_installed_plugins(config)
    })?;

    let core = plugins_of_type(&plugins, PluginType::Core);
    print_plugins(&core, PluginType::Core);

    copy_runtime_library(config)?;
    merge_all(config, &core)?;

    if config.harmony.web_dir_abs.exists() {
        debug!(
            "Web assets already present at {:?}, skipping copy",
            config.harmony.web_dir_abs
        );
    } else {
        run_task("Copying web assets", || copy_web_assets(config))?;
    }

    print_plugins(
        &plugins_of_type(&plugins, PluginType::Incompatible),
        PluginType::Incompatible,
    );
    check_platform_versions(config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::merger::plugins_json_path;
    use crate::harmony::test_support::{harmony_project, native_plugin_package, TestProject};
    use capharmony_manifest::{read_json, LegacyConfig, PluginDescriptor};
    use serde_json::{json, Value};
    use std::fs;
    use std::path::Path;

    fn write(path: &Path, body: &str) -> Option<()> {
        fs::create_dir_all(path.parent()?).ok()?;
        fs::write(path, body).ok()
    }

    /// Fixture project with the platform package, a web build, one native
    /// plugin and one denylisted legacy plugin installed
    fn updatable_project() -> Option<TestProject> {
        let project = harmony_project()?;
        let root = project.root().to_path_buf();
        let platform_package = root.join("node_modules/@capacitor/harmony");
        write(
            &platform_package.join("package.json"),
            r#"{"name": "@capacitor/harmony", "version": "6.0.1"}"#,
        )?;
        write(
            &platform_package.join("capacitor/oh-package.json5"),
            "{name: 'capacitor'}",
        )?;
        write(
            &root.join("node_modules/@capacitor/core/package.json"),
            r#"{"name": "@capacitor/core", "version": "6.1.0"}"#,
        )?;
        write(&root.join("www/index.html"), "<html></html>")?;

        native_plugin_package(&project, "camera", "camera", "Camera")?;
        let console = root.join("node_modules/cordova-plugin-console");
        write(
            &console.join("package.json"),
            r#"{"name": "cordova-plugin-console", "version": "1.1.0"}"#,
        )?;
        write(
            &console.join("plugin.xml"),
            r#"<plugin id="cordova-plugin-console"><platform name="harmony"/></plugin>"#,
        )?;
        write(
            &root.join("package.json"),
            r#"{"dependencies": {"@capacitor/core": "^6.1.0", "camera": "1.2.3"}, "devDependencies": {"cordova-plugin-console": "1.1.0"}}"#,
        )?;
        Some(project)
    }

    #[test]
    fn test_major_version() {
        assert_eq!(major_version("6.1.0"), Some(6));
        assert_eq!(major_version("^7.0.0-beta.1"), Some(7));
        assert_eq!(major_version("latest"), None);
    }

    #[test]
    fn test_plugin_report_lists_id_and_version() {
        let mut plugin = PluginDescriptor::new("camera", "1.2.3", "/nonexistent/camera");
        plugin.xml = Some(LegacyConfig::default());
        let resolved = resolve_all(&[plugin], Platform::Harmony);

        let report = plugin_report(&resolved, Platform::Harmony, PluginType::Incompatible);
        assert_eq!(
            report.as_deref(),
            Some("Found 1 incompatible plugin(s) for harmony, skipped install:\n    camera@1.2.3")
        );
        assert!(plugin_report(&[], Platform::Harmony, PluginType::Core).is_none());
    }

    #[test]
    fn test_update_merges_and_copies() {
        let Some(project) = updatable_project() else {
            return;
        };
        let result = update_harmony_project(&project.config);
        assert!(result.is_ok(), "update failed: {:?}", result.err());

        let registry: Value = read_json(&plugins_json_path(&project.config)).unwrap_or_default();
        assert_eq!(registry.as_array().map(Vec::len), Some(1));
        assert_eq!(registry[0]["pluginClass"], json!("CameraPlugin"));

        let harmony = &project.config.harmony;
        assert!(harmony.platform_dir_abs.join("capacitor/oh-package.json5").is_file());
        assert!(harmony.platform_dir_abs.join("camera/oh-package.json5").is_file());
        assert!(!harmony.platform_dir_abs.join("cordova-plugin-console").exists());
        assert!(harmony.web_dir_abs.join("index.html").is_file());

        let emitted: Value =
            read_json(&harmony.config_dir_abs.join(APP_CONFIG_FILE)).unwrap_or_default();
        assert_eq!(emitted["appId"], json!("com.example.app"));
    }

    #[test]
    fn test_existing_web_dir_is_left_alone() {
        let Some(project) = updatable_project() else {
            return;
        };
        let marker = project.config.harmony.web_dir_abs.join("keep.txt");
        assert!(write(&marker, "mine").is_some());

        assert!(update_harmony_project(&project.config).is_ok());
        assert!(!project.config.harmony.web_dir_abs.join("index.html").exists());
        assert!(!project
            .config
            .harmony
            .config_dir_abs
            .join(APP_CONFIG_FILE)
            .exists());
    }

    #[test]
    fn test_missing_web_build_fails() {
        let Some(project) = updatable_project() else {
            return;
        };
        assert!(fs::remove_dir_all(project.root().join("www")).is_ok());
        let result = update_harmony_project(&project.config);
        assert!(matches!(result, Err(HarmonyError::WebDirNotFound(_))));
    }

    #[test]
    fn test_missing_runtime_library_fails() {
        let Some(project) = updatable_project() else {
            return;
        };
        let runtime = project
            .config
            .platform_package_dir()
            .join(RUNTIME_LIBRARY_DIR);
        assert!(fs::remove_dir_all(runtime).is_ok());
        let result = update_harmony_project(&project.config);
        assert!(matches!(result, Err(HarmonyError::RuntimeLibraryNotFound(_))));
    }

    #[test]
    fn test_version_check() {
        let Some(project) = updatable_project() else {
            return;
        };
        assert!(check_platform_versions(&project.config));

        let core = project
            .root()
            .join("node_modules/@capacitor/core/package.json");
        assert!(write(&core, r#"{"name": "@capacitor/core", "version": "5.7.0"}"#).is_some());
        assert!(!check_platform_versions(&project.config));
    }
}
