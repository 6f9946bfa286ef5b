use capharmony_config::{
    cli_config::{CONFIG_ENV_VAR, KNOWN_KEYS},
    CliConfig,
};
use clap::Subcommand;
use colored::Colorize;

use crate::errors::HarmonyError;
use crate::logger;
use crate::GlobalOpts;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the current settings
    Show,
    /// Set a setting
    Set { key: String, value: String },
    /// Print the path of the settings file
    Path,
}

pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> Result<(), HarmonyError> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = CliConfig::load()?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = CliConfig::load()?;
            if !config.set(&key, value.clone()) {
                return Err(HarmonyError::UnknownConfigKey {
                    key,
                    known: KNOWN_KEYS.join(", "),
                });
            }
            config.save()?;
            logger::success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Path => {
            let config_path = CliConfig::path()?;
            logger::debug(&format!("Reading config from: {}", config_path.display()));
            println!("{}", config_path.display());
            if std::env::var_os(CONFIG_ENV_VAR).is_some() {
                println!("{} {}", "overridden-by".cyan(), CONFIG_ENV_VAR);
            }
        }
    }
    Ok(())
}
