//! Strict-mode validation of the optional settings file.
//!
//! The file is deserialized into `C::Layer` (all-optional fields) through
//! `serde_ignored`, so every key the layer doesn't consume is reported with the
//! file path and a best-effort line number instead of being silently dropped.

use std::path::Path;

use confique::Config;
use serde::Deserialize;

use crate::error::EtcFileError;

/// Check that `content` holds no keys unknown to `C`.
pub fn validate_unknown_keys<C: Config>(content: &str, path: &Path) -> Result<(), EtcFileError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: C::Layer = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| EtcFileError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<EtcFileError> = unknown_keys
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            EtcFileError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(EtcFileError::UnknownKeys(errors))
}

/// 1-indexed line of a top-level `key = ...` assignment, or 0 if not found.
fn find_key_line(content: &str, key: &str) -> usize {
    content
        .lines()
        .position(|line| {
            line.trim()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map_or(0, |i| i + 1)
}
