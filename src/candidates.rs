//! Candidate directory list: where to look, in which order.
//!
//! Each enabled [`Tier`] contributes its directories in a fixed position:
//!
//! - `User`: `<home>/.<Project>/<version>` then `<home>/.<Project>`.
//! - `Group`: `<site>/<version>` then `<site>`, where `site` defaults to
//!   `<prefix>/site`.
//! - `Other`: `<project_dir>/etc`.
//!
//! Tiers are always emitted user, group, other. Disabling a tier removes its
//! entries without moving the others, so the first entry is always the one
//! with the highest priority.

use std::path::PathBuf;

use crate::error::EtcFileError;
use crate::identity::Identity;
use crate::types::{SearchMode, Tier};

/// Inputs that place the user and group tiers on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// User home directory. `None` drops the user tier.
    pub home: Option<PathBuf>,
    /// Per-user namespace directory name, e.g. `.OpenFOAM`.
    pub user_namespace: String,
    /// Group/site directory override.
    pub site: Option<PathBuf>,
}

/// Build the ordered candidate list for `identity` under `mode`.
pub fn build(
    identity: &Identity,
    layout: &Layout,
    mode: SearchMode,
) -> Result<Vec<PathBuf>, EtcFileError> {
    let mut dirs = Vec::new();

    for tier in [Tier::User, Tier::Group, Tier::Other] {
        if !mode.includes(tier) {
            continue;
        }
        match tier {
            Tier::User => match &layout.home {
                Some(home) => {
                    let user_dir = home.join(&layout.user_namespace);
                    dirs.push(user_dir.join(identity.version()));
                    dirs.push(user_dir);
                }
                None => tracing::warn!("no home directory, skipping user tier"),
            },
            Tier::Group => {
                let site = layout
                    .site
                    .clone()
                    .unwrap_or_else(|| identity.prefix().join("site"));
                dirs.push(site.join(identity.version()));
                dirs.push(site);
            }
            Tier::Other => dirs.push(identity.project_dir().join("etc")),
        }
    }

    if dirs.is_empty() {
        return Err(EtcFileError::NoDirectories);
    }
    for dir in &dirs {
        tracing::debug!(dir = %dir.display(), "candidate directory");
    }
    Ok(dirs)
}
