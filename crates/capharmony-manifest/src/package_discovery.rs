//! Discover installed plugin packages from an app's `node_modules`
//!
//! Every dependency listed in the app `package.json` is inspected. A package
//! with a `capacitor` field is a native plugin; a package shipping a
//! `plugin.xml` is a legacy plugin. Anything else is not a plugin.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::json_document::read_json;
use crate::legacy_xml::read_plugin_xml;
use crate::types::{PluginDescriptor, PluginManifest};

pub const PACKAGE_JSON: &str = "package.json";

/// Locates plugin packages for an app root
#[derive(Debug, Clone)]
pub struct PluginDiscoverer {
    root_dir: PathBuf,
    node_modules: PathBuf,
}

impl PluginDiscoverer {
    pub fn new(root_dir: &Path, node_modules: &Path) -> Self {
        PluginDiscoverer {
            root_dir: root_dir.to_path_buf(),
            node_modules: node_modules.to_path_buf(),
        }
    }

    /// Dependency names of the app, `dependencies` first, then
    /// `devDependencies`, without duplicates
    pub fn dependency_names(&self) -> Result<Vec<String>, ManifestError> {
        let package: Value = read_json(&self.root_dir.join(PACKAGE_JSON))?;
        let mut names: Vec<String> = Vec::new();
        for section in ["dependencies", "devDependencies"] {
            if let Some(deps) = package.get(section).and_then(Value::as_object) {
                for name in deps.keys() {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
            }
        }
        Ok(names)
    }

    /// Every installed dependency that is a plugin, in dependency order
    pub fn discover(&self) -> Result<Vec<PluginDescriptor>, ManifestError> {
        let names = self.dependency_names()?;
        debug!("Inspecting {} dependencies for plugins", names.len());

        let plugins: Vec<PluginDescriptor> = names
            .iter()
            .filter_map(|name| self.load_plugin(name))
            .collect();

        info!("Discovered {} plugin package(s)", plugins.len());
        Ok(plugins)
    }

    /// Load a single dependency as a plugin; `None` when it is not one or
    /// cannot be read
    pub fn load_plugin(&self, name: &str) -> Option<PluginDescriptor> {
        let root_path = self.node_modules.join(name);
        let meta: Value = match read_json(&root_path.join(PACKAGE_JSON)) {
            Ok(meta) => meta,
            Err(e) => {
                debug!("Skipping '{}': {}", name, e);
                return None;
            }
        };

        let version = meta
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or("0.0.0");
        let mut descriptor = PluginDescriptor::new(name, version, root_path);
        if let Some(display_name) = meta.get("name").and_then(Value::as_str) {
            descriptor.name = Arc::from(display_name);
        }

        if let Some(manifest) = meta.get("capacitor").and_then(PluginManifest::from_value) {
            descriptor.manifest = Some(manifest);
            return Some(descriptor);
        }

        match read_plugin_xml(&descriptor.root_path) {
            Ok(Some(xml)) => {
                descriptor.xml = Some(xml);
                Some(descriptor)
            }
            Ok(None) => None,
            Err(e) => {
                debug!("Skipping '{}': {}", name, e);
                None
            }
        }
    }
}

/// Discover plugins for the app at `root_dir`
pub fn discover_plugins(
    root_dir: &Path,
    node_modules: &Path,
) -> Result<Vec<PluginDescriptor>, ManifestError> {
    PluginDiscoverer::new(root_dir, node_modules).discover()
}

/// Version string from an installed package's `package.json`
pub fn installed_version(node_modules: &Path, package: &str) -> Option<String> {
    let meta: Value = read_json(&node_modules.join(package).join(PACKAGE_JSON)).ok()?;
    meta.get("version")
        .and_then(Value::as_str)
        .map(str::to_string)
}
