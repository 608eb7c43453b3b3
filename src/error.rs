use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtcFileError {
    #[error("{0}")]
    Usage(String),

    #[error("Invalid mode '{0}' (expected any combination of u, g, o)")]
    InvalidMode(String),

    #[error("Unknown/unsupported naming convention for '{name}'")]
    UnknownNamingConvention { name: String },

    #[error("No directories to scan")]
    NoDirectories,

    #[error("Cannot determine the project directory; set WM_PROJECT_DIR")]
    ProjectDirUnknown,

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in settings file")]
    UnknownKeys(Vec<EtcFileError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),
}

impl EtcFileError {
    /// Process exit status for this error. Every error is fatal with status 1;
    /// "not found" is a status, not an error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
