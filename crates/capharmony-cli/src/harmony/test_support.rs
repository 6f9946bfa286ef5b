//! Fixture builders shared by the harmony unit tests

use capharmony_config::{AppConfig, CliConfig};
use capharmony_manifest::{PluginDescriptor, PluginDiscoverer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub(crate) struct TestProject {
    pub dir: TempDir,
    pub config: AppConfig,
}

impl TestProject {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

fn write(path: &Path, body: &str) -> Option<()> {
    fs::create_dir_all(path.parent()?).ok()?;
    fs::write(path, body).ok()
}

pub(crate) const APP_STRINGS: &str = r#"{
  "string": [
    {"name": "app_name", "value": "Template"}
  ]
}"#;

pub(crate) const ENTRY_STRINGS: &str = r#"{
  "string": [
    {"name": "module_desc", "value": "module description"},
    {"name": "CareAbility_label", "value": "Template"}
  ]
}"#;

/// App root with `capacitor.config.json`, `package.json` and a scaffolded
/// Harmony project (no `zh_CN` locale)
pub(crate) fn harmony_project() -> Option<TestProject> {
    let dir = TempDir::new().ok()?;
    let root = dir.path();

    write(
        &root.join("capacitor.config.json"),
        r#"{"appId": "com.example.app", "appName": "My & \"App\"", "webDir": "www"}"#,
    )?;
    write(&root.join("package.json"), r#"{"dependencies": {}}"#)?;

    let platform = root.join("harmony");
    write(
        &platform.join("build-profile.json5"),
        "{\n  app: {products: [{name: 'default'}]},\n  modules: [\n    {name: 'entry', srcPath: './entry'},\n  ],\n}\n",
    )?;
    write(
        &platform.join("AppScope").join("app.json5"),
        "{\n  // app scope\n  app: {bundleName: 'com.example.template', versionCode: 1000000},\n}\n",
    )?;
    write(
        &platform.join("AppScope/resources/base/element/string.json"),
        APP_STRINGS,
    )?;

    let entry = platform.join("entry");
    write(
        &entry.join("oh-package.json5"),
        "{\n  name: 'entry',\n  version: '1.0.0',\n  dependencies: {},\n}\n",
    )?;
    write(
        &entry.join("build-profile.json5"),
        "{\n  apiType: 'stageMode',\n  buildOption: {},\n}\n",
    )?;
    let resources = entry.join("src/main/resources");
    write(&resources.join("base/element/string.json"), ENTRY_STRINGS)?;
    write(&resources.join("en_US/element/string.json"), ENTRY_STRINGS)?;
    fs::create_dir_all(resources.join("rawfile")).ok()?;

    let config = AppConfig::load(root, &CliConfig::default()).ok()?;
    Some(TestProject { dir, config })
}

/// Install a native Harmony plugin under `node_modules/<dir_name>`
pub(crate) fn native_plugin_package(
    project: &TestProject,
    dir_name: &str,
    package_name: &str,
    module_name: &str,
) -> Option<PluginDescriptor> {
    let node_modules = project.root().join("node_modules");
    let plugin_root = node_modules.join(dir_name);
    write(
        &plugin_root.join("package.json"),
        &format!(
            r#"{{"name": "{}", "version": "1.2.3", "capacitor": {{"harmony": {{}}}}}}"#,
            dir_name
        ),
    )?;
    let sources = plugin_root.join("harmony");
    write(
        &sources.join("oh-package.json5"),
        &format!("{{\n  name: '{}',\n  version: '1.2.3',\n}}\n", package_name),
    )?;
    write(
        &sources.join("src/main/module.json5"),
        &format!("{{\n  module: {{name: '{}', type: 'har'}},\n}}\n", module_name),
    )?;
    write(
        &sources.join("src/main/ets").join(format!("{}Plugin.ets", module_name)),
        "export class Plugin {}\n",
    )?;

    PluginDiscoverer::new(project.root(), &node_modules).load_plugin(dir_name)
}
