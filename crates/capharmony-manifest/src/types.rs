//! Plugin data model
//!
//! Descriptors come out of package discovery and are never mutated afterwards;
//! resolution produces a separate [`ResolvedPlugin`] value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

// =============================================================================
// PLATFORM
// =============================================================================

/// Native platforms managed by this tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Harmony,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Harmony => "harmony",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PLUGIN DESCRIPTOR
// =============================================================================

/// Per-platform entry of a plugin's native manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformManifest {
    /// Custom source subpath, relative to the plugin root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// Native manifest of a plugin (the `capacitor` field of its `package.json`),
/// keyed by platform name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    #[serde(flatten)]
    pub platforms: BTreeMap<String, PlatformManifest>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl PluginManifest {
    /// Build from the raw `capacitor` value. Falsy platform entries (`null`,
    /// `false`, `0`, `""`) are not declarations; other non-object entries are
    /// kept as declared with no custom source path.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let platforms = object
            .iter()
            .filter(|(_, entry)| is_truthy(entry))
            .map(|(name, entry)| {
                let src = entry
                    .get("src")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                (name.clone(), PlatformManifest { src })
            })
            .collect();
        Some(PluginManifest { platforms })
    }

    pub fn platform(&self, platform: Platform) -> Option<&PlatformManifest> {
        self.platforms.get(platform.as_str())
    }
}

/// Legacy (Cordova) `plugin.xml` metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyConfig {
    /// `id` attribute of the root `<plugin>` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Names of the declared `<platform>` elements, in document order
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl LegacyConfig {
    pub fn declares_platform(&self, name: &str) -> bool {
        self.platforms.iter().any(|p| p == name)
    }
}

/// An installed plugin package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub version: Arc<str>,
    pub root_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PluginManifest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<LegacyConfig>,
}

impl PluginDescriptor {
    pub fn new(id: &str, version: &str, root_path: impl Into<PathBuf>) -> Self {
        PluginDescriptor {
            id: Arc::from(id),
            name: Arc::from(id),
            version: Arc::from(version),
            root_path: root_path.into(),
            manifest: None,
            xml: None,
        }
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Compatibility classification of a plugin for a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginType {
    /// Native implementation declared in the plugin manifest
    Core,
    /// Implemented through the legacy XML-configured bridge
    Cordova,
    /// Declares legacy support but is known not to work
    Incompatible,
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PluginType::Core => "core",
            PluginType::Cordova => "cordova",
            PluginType::Incompatible => "incompatible",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAnnotation {
    #[serde(rename = "type")]
    pub plugin_type: PluginType,
    /// Platform sources relative to the plugin root, always `/`-separated
    pub path: String,
}

/// A descriptor paired with its platform annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlugin {
    pub descriptor: Arc<PluginDescriptor>,
    pub platform: Platform,
    pub annotation: PlatformAnnotation,
}

impl ResolvedPlugin {
    pub fn plugin_type(&self) -> PluginType {
        self.annotation.plugin_type
    }

    pub fn is_core(&self) -> bool {
        self.annotation.plugin_type == PluginType::Core
    }

    /// Absolute location of the platform sources
    pub fn source_dir(&self) -> PathBuf {
        self.descriptor.root_path.join(&self.annotation.path)
    }
}

// =============================================================================
// GENERATED ENTRIES
// =============================================================================

/// One record of `capacitor.plugins.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginsJsonEntry {
    pub plugin: String,
    pub plugin_class: String,
    pub module: String,
    pub module_alias: String,
}

/// Suffix appended to a module name to form the plugin class name
pub const PLUGIN_CLASS_SUFFIX: &str = "Plugin";

impl PluginsJsonEntry {
    pub fn new(package_name: &str, module_name: &str) -> Self {
        PluginsJsonEntry {
            plugin: package_name.to_string(),
            plugin_class: format!("{}{}", module_name, PLUGIN_CLASS_SUFFIX),
            module: module_name.to_string(),
            module_alias: package_name.to_string(),
        }
    }
}

/// `oh-package.json5` of a plugin module, only the fields we read
#[derive(Debug, Clone, Deserialize)]
pub struct OhPackage {
    pub name: String,
}

/// `src/main/module.json5` of a plugin module, only the fields we read
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDescriptor {
    pub module: ModuleInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
}
