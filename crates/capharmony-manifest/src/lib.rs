//! Capharmony manifest handling
//!
//! Plugin data model, plugin discovery from `node_modules`, legacy
//! `plugin.xml` reading, and read-modify-write access to the JSON/JSON5
//! manifests of a Harmony native project.

pub mod errors;
pub mod json_document;
pub mod legacy_xml;
pub mod package_discovery;
pub mod types;

pub use errors::ManifestError;
pub use json_document::{read_json, read_json5, write_json_pretty, write_json_tabs, JsonDocument};
pub use package_discovery::{discover_plugins, installed_version, PluginDiscoverer};
pub use types::{
    LegacyConfig, ModuleDescriptor, OhPackage, PlatformAnnotation, PlatformManifest, Platform,
    PluginDescriptor, PluginManifest, PluginType, PluginsJsonEntry, ResolvedPlugin,
    PLUGIN_CLASS_SUFFIX,
};
