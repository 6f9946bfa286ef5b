//! Common types and utilities shared across modules

use clap::Parser;
use std::path::PathBuf;

use crate::errors::HarmonyError;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(long, global = true, help = "Do not write log messages to the console")]
    pub no_stdout: bool,

    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "App project root (defaults to the current directory)"
    )]
    pub root: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// The app project root
    pub fn project_root(&self) -> Result<PathBuf, HarmonyError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().map_err(|e| HarmonyError::io(".", e)),
        }
    }
}
