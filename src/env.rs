//! Project settings from the environment and an optional settings file.
//!
//! Layers, highest priority first:
//!
//! ```text
//! Environment       WM_PROJECT, WM_PROJECT_VERSION, WM_PROJECT_SITE, ...
//!        ↑ overrides
//! Settings file     TOML file named by ETCFILE_CONFIG (strict)
//!        ↑ overrides
//! Defaults          #[config(default = ...)]
//! ```
//!
//! Both layers are flat, so merging is a plain key overwrite. Empty
//! environment variables count as unset, the way a shell `${VAR:-default}`
//! treats them.
//!
//! Everything here takes pre-loaded data so tests never touch the process
//! environment; [`load`] is the only function that reads it.

use std::path::PathBuf;

use confique::Config;
use toml::{Table, Value};

use crate::error::EtcFileError;
use crate::types::SearchMode;
use crate::validate;

/// Names the settings file.
pub const SETTINGS_FILE_VAR: &str = "ETCFILE_CONFIG";

/// Environment variable → settings key.
const ENV_KEYS: [(&str, &str); 5] = [
    ("WM_PROJECT", "project"),
    ("WM_PROJECT_VERSION", "version"),
    ("WM_PROJECT_SITE", "site"),
    ("WM_PROJECT_DIR", "project_dir"),
    ("FOAM_CONFIG_MODE", "mode"),
];

/// Installation-wide settings shared by every lookup.
#[derive(Config, Debug)]
pub struct ProjectEnv {
    /// Project name. Names the per-user directory (`~/.<project>`) and,
    /// lowercased, the token in front of compact installation names.
    #[config(default = "OpenFOAM")]
    pub project: String,

    /// Installation version. Names the per-version user and site
    /// directories; the project directory name is left as it is.
    pub version: Option<String>,

    /// Group/site directory (default `<prefix>/site`).
    pub site: Option<PathBuf>,

    /// Project installation directory (default: found from the executable).
    pub project_dir: Option<PathBuf>,

    /// Default search mode, any combination of `u`, `g`, `o`.
    pub mode: Option<SearchMode>,
}

/// Build a settings table from the recognised environment variables.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_to_table(vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let mut table = Table::new();
    for (name, value) in vars {
        if value.is_empty() {
            continue;
        }
        if let Some((_, key)) = ENV_KEYS.iter().find(|(var, _)| *var == name) {
            table.insert((*key).to_string(), Value::String(value));
        }
    }
    table
}

/// Resolve settings from an optional `(path, content)` settings file and
/// environment pairs.
pub fn resolve(
    file: Option<(PathBuf, String)>,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<ProjectEnv, EtcFileError> {
    let mut merged = Table::new();
    if let Some((path, content)) = &file {
        validate::validate_unknown_keys::<ProjectEnv>(content, path)?;
        merged = toml::from_str(content).map_err(|e| EtcFileError::ParseError {
            path: path.clone(),
            source: e,
        })?;
    }
    merged.extend(env_to_table(vars));

    let layer: <ProjectEnv as Config>::Layer = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| EtcFileError::InvalidSetting(e.to_string()))?;

    ProjectEnv::builder()
        .preloaded(layer)
        .load()
        .map_err(EtcFileError::from)
}

/// Resolve settings from the process environment.
pub fn load() -> Result<ProjectEnv, EtcFileError> {
    let file = match std::env::var_os(SETTINGS_FILE_VAR).filter(|p| !p.is_empty()) {
        Some(path) => {
            let path = PathBuf::from(path);
            let content =
                std::fs::read_to_string(&path).map_err(|source| EtcFileError::IoError {
                    path: path.clone(),
                    source,
                })?;
            Some((path, content))
        }
        None => None,
    };
    resolve(file, std::env::vars())
}
