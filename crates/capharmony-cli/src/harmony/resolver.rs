//! Plugin compatibility resolution
//!
//! Decides for each installed plugin whether it supports a platform and where
//! its platform sources live. Resolution never touches the input descriptor;
//! annotated plugins are returned as new [`ResolvedPlugin`] values.

use capharmony_manifest::{
    PlatformAnnotation, Platform, PluginDescriptor, PluginType, ResolvedPlugin,
};
use rayon::prelude::*;
use std::sync::Arc;

/// Legacy plugins known not to work outside their original platforms
pub const INCOMPATIBLE_LEGACY_PLUGINS: &[&str] = &[
    "cordova-plugin-splashscreen",
    "cordova-plugin-ionic-webview",
    "cordova-plugin-crosswalk-webview",
    "cordova-plugin-wkwebview-engine",
    "cordova-plugin-console",
    "cordova-plugin-music-controls",
    "cordova-plugin-add-swift-support",
    "cordova-plugin-ionic-keyboard",
    "cordova-plugin-braintree",
    "@ionic-enterprise/filesystem",
    "@ionic-enterprise/keyboard",
    "@ionic-enterprise/splashscreen",
    "cordova-support-google-services",
];

/// Platform a legacy `plugin.xml` must declare for the bridge to be usable
pub fn legacy_reference_platform(platform: Platform) -> &'static str {
    match platform {
        Platform::Harmony => Platform::Harmony.as_str(),
    }
}

/// Use `/` separators regardless of host conventions
pub fn to_unix_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Annotate `plugin` for `platform`, or `None` when the plugin declares no
/// support for it at all
pub fn resolve_plugin(plugin: &PluginDescriptor, platform: Platform) -> Option<ResolvedPlugin> {
    let platform_name = platform.as_str();

    let annotation = if let Some(native) = plugin
        .manifest
        .as_ref()
        .and_then(|manifest| manifest.platform(platform))
    {
        let mut files_path = native
            .src
            .clone()
            .filter(|src| !src.is_empty())
            .unwrap_or_else(|| platform_name.to_string());
        // Older layouts nested the sources in a folder named after the plugin id
        if plugin
            .root_path
            .join(&files_path)
            .join(plugin.id.as_ref())
            .exists()
        {
            files_path = format!("{}/{}", platform_name, plugin.id);
        }
        PlatformAnnotation {
            plugin_type: PluginType::Core,
            path: to_unix_path(&files_path),
        }
    } else if let Some(xml) = &plugin.xml {
        let incompatible = INCOMPATIBLE_LEGACY_PLUGINS.contains(&plugin.id.as_ref())
            || !xml.declares_platform(legacy_reference_platform(platform));
        PlatformAnnotation {
            plugin_type: if incompatible {
                PluginType::Incompatible
            } else {
                PluginType::Cordova
            },
            path: format!("src/{}", platform_name),
        }
    } else {
        return None;
    };

    tracing::debug!(
        "Resolved '{}' for {} as {} ({})",
        plugin.id,
        platform,
        annotation.plugin_type,
        annotation.path
    );

    Some(ResolvedPlugin {
        descriptor: Arc::new(plugin.clone()),
        platform,
        annotation,
    })
}

/// Resolve every plugin in parallel, keeping only the ones that support
/// `platform`, in input order
pub fn resolve_all(plugins: &[PluginDescriptor], platform: Platform) -> Vec<ResolvedPlugin> {
    plugins
        .par_iter()
        .filter_map(|plugin| resolve_plugin(plugin, platform))
        .collect()
}

/// Plugins of the given type, in order
pub fn plugins_of_type(plugins: &[ResolvedPlugin], plugin_type: PluginType) -> Vec<ResolvedPlugin> {
    plugins
        .iter()
        .filter(|plugin| plugin.plugin_type() == plugin_type)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use capharmony_manifest::{LegacyConfig, PlatformManifest, PluginManifest};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn native_plugin(id: &str, root: &Path, src: Option<&str>) -> PluginDescriptor {
        let mut platforms = BTreeMap::new();
        platforms.insert(
            "harmony".to_string(),
            PlatformManifest {
                src: src.map(str::to_string),
            },
        );
        let mut plugin = PluginDescriptor::new(id, "1.0.0", root);
        plugin.manifest = Some(PluginManifest { platforms });
        plugin
    }

    fn legacy_plugin(id: &str, platforms: &[&str]) -> PluginDescriptor {
        let mut plugin = PluginDescriptor::new(id, "1.0.0", "/nonexistent/legacy");
        plugin.xml = Some(LegacyConfig {
            id: Some(id.to_string()),
            platforms: platforms.iter().map(|p| (*p).to_string()).collect(),
        });
        plugin
    }

    #[test]
    fn test_unrelated_plugin_is_filtered_out() {
        let plugin = PluginDescriptor::new("lodash", "4.17.21", "/nonexistent/lodash");
        assert!(resolve_plugin(&plugin, Platform::Harmony).is_none());
        assert!(resolve_all(&[plugin], Platform::Harmony).is_empty());
    }

    #[test]
    fn test_manifest_for_other_platform_only_is_filtered_out() {
        let mut plugin = PluginDescriptor::new("ios-only", "1.0.0", "/nonexistent/ios-only");
        let mut platforms = BTreeMap::new();
        platforms.insert("ios".to_string(), PlatformManifest::default());
        plugin.manifest = Some(PluginManifest { platforms });
        assert!(resolve_plugin(&plugin, Platform::Harmony).is_none());
    }

    #[test]
    fn test_native_plugin_defaults_to_platform_path() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let plugin = native_plugin("foo", temp_dir.path(), None);
        let resolved = resolve_plugin(&plugin, Platform::Harmony);
        assert!(resolved.is_some());
        let Some(resolved) = resolved else {
            return;
        };
        assert_eq!(resolved.plugin_type(), PluginType::Core);
        assert_eq!(resolved.annotation.path, "harmony");
    }

    #[test]
    fn test_legacy_id_subfolder_is_detected() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(fs::create_dir_all(temp_dir.path().join("harmony").join("foo")).is_ok());
        let plugin = native_plugin("foo", temp_dir.path(), None);
        let resolved = resolve_plugin(&plugin, Platform::Harmony);
        assert!(resolved.is_some_and(|r| r.annotation.path == "harmony/foo"));
    }

    #[test]
    fn test_legacy_subfolder_under_custom_src_maps_to_platform_path() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(fs::create_dir_all(temp_dir.path().join("native").join("foo")).is_ok());
        let plugin = native_plugin("foo", temp_dir.path(), Some("native"));
        let resolved = resolve_plugin(&plugin, Platform::Harmony);
        assert!(resolved.is_some_and(|r| r.annotation.path == "harmony/foo"));
    }

    #[test]
    fn test_custom_src_is_normalized_to_forward_slashes() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let plugin = native_plugin("foo", temp_dir.path(), Some("native\\harmony"));
        let resolved = resolve_plugin(&plugin, Platform::Harmony);
        assert!(resolved.is_some_and(|r| {
            r.is_core() && r.annotation.path == "native/harmony"
        }));
    }

    #[test]
    fn test_empty_src_falls_back_to_platform_path() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let plugin = native_plugin("foo", temp_dir.path(), Some(""));
        let resolved = resolve_plugin(&plugin, Platform::Harmony);
        assert!(resolved.is_some_and(|r| r.is_core() && r.annotation.path == "harmony"));
    }

    #[test]
    fn test_falsy_platform_entry_is_not_a_declaration() {
        for raw in [json!({"harmony": null}), json!({"harmony": false})] {
            let mut plugin = PluginDescriptor::new("foo", "1.0.0", "/nonexistent/foo");
            plugin.manifest = PluginManifest::from_value(&raw);
            assert!(
                resolve_plugin(&plugin, Platform::Harmony).is_none(),
                "{} should not resolve",
                raw
            );

            plugin.xml = Some(LegacyConfig {
                id: Some("foo".to_string()),
                platforms: vec!["harmony".to_string()],
            });
            let resolved = resolve_plugin(&plugin, Platform::Harmony);
            assert!(resolved.is_some_and(|r| r.plugin_type() == PluginType::Cordova));
        }
    }

    #[test]
    fn test_legacy_plugin_declaring_platform_is_cordova() {
        let plugin = legacy_plugin("cordova-plugin-device", &["android", "harmony"]);
        let resolved = resolve_plugin(&plugin, Platform::Harmony);
        assert!(resolved.is_some_and(|r| {
            r.plugin_type() == PluginType::Cordova && r.annotation.path == "src/harmony"
        }));
    }

    #[test]
    fn test_legacy_plugin_without_platform_is_incompatible() {
        let plugin = legacy_plugin("cordova-plugin-device", &["android", "ios"]);
        let resolved = resolve_plugin(&plugin, Platform::Harmony);
        assert!(resolved.is_some_and(|r| r.plugin_type() == PluginType::Incompatible));
    }

    #[test]
    fn test_denylisted_legacy_plugin_is_incompatible() {
        for id in INCOMPATIBLE_LEGACY_PLUGINS {
            let plugin = legacy_plugin(id, &["harmony"]);
            let resolved = resolve_plugin(&plugin, Platform::Harmony);
            assert!(
                resolved.is_some_and(|r| r.plugin_type() == PluginType::Incompatible),
                "{} should be incompatible",
                id
            );
        }
    }

    #[test]
    fn test_native_manifest_wins_over_legacy_config() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let mut plugin = native_plugin("cordova-plugin-console", temp_dir.path(), None);
        plugin.xml = Some(LegacyConfig::default());
        let resolved = resolve_plugin(&plugin, Platform::Harmony);
        assert!(resolved.is_some_and(|r| r.is_core()));
    }

    #[test]
    fn test_resolution_leaves_input_untouched() {
        let plugin = legacy_plugin("cordova-plugin-device", &["harmony"]);
        let before = plugin.clone();
        let _ = resolve_plugin(&plugin, Platform::Harmony);
        assert_eq!(plugin, before);
    }

    #[test]
    fn test_resolve_all_preserves_order() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let mut plugins = Vec::new();
        for i in 0..64 {
            if i % 3 == 0 {
                plugins.push(PluginDescriptor::new(
                    &format!("unrelated-{}", i),
                    "1.0.0",
                    temp_dir.path(),
                ));
            } else if i % 3 == 1 {
                plugins.push(native_plugin(&format!("native-{}", i), temp_dir.path(), None));
            } else {
                plugins.push(legacy_plugin(&format!("legacy-{}", i), &["harmony"]));
            }
        }

        let resolved = resolve_all(&plugins, Platform::Harmony);
        let expected: Vec<&str> = plugins
            .iter()
            .map(|p| p.id.as_ref())
            .filter(|id| !id.starts_with("unrelated"))
            .collect();
        let actual: Vec<&str> = resolved.iter().map(|r| r.descriptor.id.as_ref()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_plugins_of_type() {
        let plugins = vec![
            legacy_plugin("a", &["harmony"]),
            legacy_plugin("b", &["android"]),
        ];
        let resolved = resolve_all(&plugins, Platform::Harmony);
        let incompatible = plugins_of_type(&resolved, PluginType::Incompatible);
        assert_eq!(incompatible.len(), 1);
        assert_eq!(incompatible[0].descriptor.id.as_ref(), "b");
    }
}
