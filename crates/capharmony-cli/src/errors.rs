//! Centralized error type for Harmony project operations

use capharmony_config::ConfigError;
use capharmony_manifest::ManifestError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarmonyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Platform package '{0}' is not installed. Install it with: npm install {0}")]
    PlatformNotInstalled(String),

    #[error("Harmony platform already exists at {}", .0.display())]
    PlatformExists(PathBuf),

    #[error("Harmony project template not found at {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Harmony runtime library not found at {}", .0.display())]
    RuntimeLibraryNotFound(PathBuf),

    #[error("Could not find the web assets directory {}. Build your web app first", .0.display())]
    WebDirNotFound(PathBuf),

    #[error("Plugin '{plugin}' registers module '{module}', which is already used by {owner}")]
    ModuleNameConflict {
        module: String,
        plugin: String,
        owner: String,
    },

    #[error("Unknown config key: {key}. Currently supported keys: {known}")]
    UnknownConfigKey { key: String, known: String },

    #[error("Failed to copy {} to {}: {message}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },
}

impl HarmonyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HarmonyError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_platform_not_installed_display() {
        let err = HarmonyError::PlatformNotInstalled("@capacitor/harmony".to_string());
        assert_eq!(
            err.to_string(),
            "Platform package '@capacitor/harmony' is not installed. Install it with: npm install @capacitor/harmony"
        );
    }

    #[test]
    fn test_manifest_error_converts() {
        let err: HarmonyError = ManifestError::NotFound(PathBuf::from("oh-package.json5")).into();
        assert!(matches!(err, HarmonyError::Manifest(_)));
        assert!(err.to_string().contains("oh-package.json5"));
    }
}
