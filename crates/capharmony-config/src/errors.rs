use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse CLI config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize CLI config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory")]
    HomeDirNotFound,

    #[error("Missing required field '{field}' in {}", path.display())]
    MissingField { path: PathBuf, field: &'static str },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
