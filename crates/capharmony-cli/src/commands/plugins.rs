use capharmony_manifest::{PluginType, ResolvedPlugin};
use colored::Colorize;

use crate::commands::load_app_config;
use crate::errors::HarmonyError;
use crate::harmony::resolver::plugins_of_type;
use crate::harmony::update::resolve_installed_plugins;
use crate::GlobalOpts;

const SECTIONS: [(PluginType, &str); 3] = [
    (PluginType::Core, "Capacitor plugins:"),
    (PluginType::Cordova, "Cordova plugins:"),
    (PluginType::Incompatible, "Incompatible plugins:"),
];

/// One line per plugin: `id@version` followed by its platform source path
pub fn plugin_line(plugin: &ResolvedPlugin, verbose: bool) -> String {
    let mut line = format!(
        "  {}@{}",
        plugin.descriptor.id.as_ref().cyan(),
        plugin.descriptor.version
    );
    if verbose {
        line.push_str(&format!(
            " {}",
            format!("({})", plugin.source_dir().display()).dimmed()
        ));
    } else {
        line.push_str(&format!(" {}", plugin.annotation.path.dimmed()));
    }
    line
}

/// List every installed plugin that supports Harmony, grouped by type
pub fn list_plugins(opts: &GlobalOpts) -> Result<(), HarmonyError> {
    let config = load_app_config(opts)?;
    let plugins = resolve_installed_plugins(&config)?;

    if plugins.is_empty() {
        println!("No Harmony plugins found.\n");
        println!(
            "Install a plugin with npm, then run:\n  {} update",
            "capharmony".bold().cyan()
        );
        return Ok(());
    }

    for (plugin_type, title) in SECTIONS {
        let group = plugins_of_type(&plugins, plugin_type);
        if group.is_empty() {
            continue;
        }
        let title = match plugin_type {
            PluginType::Incompatible => title.bold().yellow(),
            _ => title.bold().green(),
        };
        println!("{}", title);
        for plugin in &group {
            println!("{}", plugin_line(plugin, opts.verbosity_level() > 0));
        }
    }
    Ok(())
}
