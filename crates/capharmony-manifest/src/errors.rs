use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or rewriting manifest files
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse JSON5 in {}: {message}", path.display())]
    Json5 { path: PathBuf, message: String },

    #[error("Failed to parse plugin.xml in {}: {message}", path.display())]
    Xml { path: PathBuf, message: String },

    #[error("Invalid manifest {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },
}

impl ManifestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ManifestError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }
}
