//! Installation identity: which project directory, which version.
//!
//! An installation directory is named after the project and its version, in
//! one of two conventions:
//!
//! - **Standard**: `<token>-<version>`, e.g. `OpenFOAM-2.3.1`. The name is
//!   split on the first hyphen and the base token keeps the hyphen
//!   (`OpenFOAM-`).
//! - **Compact**: `<token><digits>`, e.g. `openfoam231`, as used by distro
//!   packages. The token is a fixed literal (the lowercased project name) and
//!   the digits spell the version one digit per segment (`231` → `2.3.1`).
//!   Version codes are two to four digits. A single digit is accepted as well;
//!   it cannot be dotted, so the digit is taken verbatim and the installation
//!   is marked as not using compact numbering.
//!
//! The naming is decomposed once into a [`Naming`] and carried with the
//! [`Identity`]. Only an explicit override ([`VersionSource::Override`])
//! reassembles the directory name from the base token. A configured default
//! ([`VersionSource::Default`]) replaces the version used for the per-version
//! directories and leaves the installation directory alone.

use std::path::{Path, PathBuf};

use crate::error::EtcFileError;

/// Longest digit run accepted by the compact convention.
const MAX_COMPACT_DIGITS: usize = 4;

/// How the installation directory name is put together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Naming {
    /// `<base><version>`, `base` includes the trailing hyphen.
    Standard { base: String },
    /// `<base><digits>` with no separator.
    Compact {
        base: String,
        digits: String,
        compact_numbering: bool,
    },
}

impl Naming {
    /// Decompose a directory name into its naming and the version it encodes.
    ///
    /// `compact_token` is the fixed literal expected in front of the digits of
    /// a compact name.
    pub fn decompose(name: &str, compact_token: &str) -> Result<(Naming, String), EtcFileError> {
        if let Some((token, version)) = name.split_once('-')
            && !token.is_empty()
            && !version.is_empty()
        {
            let naming = Naming::Standard {
                base: format!("{token}-"),
            };
            return Ok((naming, version.to_string()));
        }

        if let Some(digits) = name.strip_prefix(compact_token)
            && (1..=MAX_COMPACT_DIGITS).contains(&digits.len())
            && digits.chars().all(|c| c.is_ascii_digit())
        {
            let dotted = dot_digits(digits);
            let compact_numbering = dotted.len() > digits.len();
            let version = if compact_numbering {
                dotted
            } else {
                digits.to_string()
            };
            let naming = Naming::Compact {
                base: compact_token.to_string(),
                digits: digits.to_string(),
                compact_numbering,
            };
            return Ok((naming, version));
        }

        Err(EtcFileError::UnknownNamingConvention {
            name: name.to_string(),
        })
    }

    /// Directory name for `version` under this naming.
    pub fn assemble(&self, version: &str) -> String {
        match self {
            Naming::Standard { base } => format!("{base}{version}"),
            Naming::Compact {
                base,
                compact_numbering: true,
                ..
            } => format!("{base}{}", version.replace('.', "")),
            Naming::Compact { base, .. } => format!("{base}{version}"),
        }
    }

    /// Same naming, renumbered for `version`.
    fn with_version(&self, version: &str) -> Naming {
        match self {
            Naming::Standard { .. } => self.clone(),
            Naming::Compact {
                base,
                compact_numbering,
                ..
            } => {
                let digits = if *compact_numbering {
                    version.replace('.', "")
                } else {
                    version.to_string()
                };
                Naming::Compact {
                    base: base.clone(),
                    digits,
                    compact_numbering: *compact_numbering,
                }
            }
        }
    }
}

/// `163` → `1.6.3`
fn dot_digits(digits: &str) -> String {
    let mut dotted = String::with_capacity(digits.len() * 2);
    for c in digits.chars() {
        dotted.push(c);
        dotted.push('.');
    }
    dotted.pop();
    dotted
}

/// Where the version of an [`Identity`] comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionSource<'a> {
    /// The version encoded in the directory name.
    #[default]
    Decoded,
    /// Configured version, e.g. from `WM_PROJECT_VERSION`. The directory name
    /// is kept.
    Default(&'a str),
    /// Explicit override. The directory name is reassembled around it.
    Override(&'a str),
}

/// The installation being queried. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    naming: Naming,
    version: String,
    dir_name: String,
    prefix: PathBuf,
    project_dir: PathBuf,
}

impl Identity {
    /// Resolve the identity of the installation directory `dir_name` under
    /// `prefix`.
    ///
    /// The name must decompose even when the version comes from elsewhere.
    pub fn resolve(
        dir_name: &str,
        compact_token: &str,
        source: VersionSource<'_>,
        prefix: &Path,
    ) -> Result<Identity, EtcFileError> {
        let (naming, decoded) = Naming::decompose(dir_name, compact_token)?;

        let (naming, version, dir_name) = match source {
            VersionSource::Decoded => (naming, decoded, dir_name.to_string()),
            VersionSource::Default(v) => (naming, v.to_string(), dir_name.to_string()),
            VersionSource::Override(v) => {
                (naming.with_version(v), v.to_string(), naming.assemble(v))
            }
        };

        let identity = Identity {
            project_dir: prefix.join(&dir_name),
            prefix: prefix.to_path_buf(),
            naming,
            version,
            dir_name,
        };
        tracing::debug!(
            dir_name = %identity.dir_name,
            version = %identity.version,
            prefix = %identity.prefix.display(),
            "resolved installation identity"
        );
        Ok(identity)
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// `prefix / dir_name`
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}
