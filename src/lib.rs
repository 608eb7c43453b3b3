//! Locate user, group and shipped configuration files for an installed project.
//!
//! An installation ships its configuration under `<project>/etc`. Sites and
//! users override it by placing files of the same name in their own
//! directories, and `etcfile` finds the one that applies:
//!
//! ```text
//! ~/.OpenFOAM/2.3.1/      user, this version
//! ~/.OpenFOAM/            user, any version
//! <prefix>/site/2.3.1/    group, this version
//! <prefix>/site/          group, any version
//! <project>/etc/          shipped with the installation
//! ```
//!
//! The first directory holding the file wins. Version-qualified directories
//! come before their unqualified fallback, and user beats group beats
//! shipped.
//!
//! ```ignore
//! let locator = EtcFile::builder()
//!     .project_dir("/opt/OpenFOAM-2.3.1")
//!     .build()?;
//! let request = Request::new(Operation::Resolve { file_name: "controlDict".into() });
//! let outcome = locator.resolve(&request, &OsProbe);
//! ```
//!
//! # Installation identity
//!
//! The project directory name carries the version, either as
//! `OpenFOAM-2.3.1` or in the compact packaging form `openfoam231`. The name
//! is decomposed once into an [`Identity`]; overriding the version
//! reassembles the name in the same convention, so `-version 2.4.0` moves
//! the shipped directory to `OpenFOAM-2.4.0/etc` (or `openfoam240/etc`).
//! `WM_PROJECT_VERSION` only renames the per-version user and site
//! directories.
//!
//! # Search modes
//!
//! A [`SearchMode`] selects any combination of the user (`u`), group (`g`)
//! and other (`o`) tiers. Disabling a tier never reorders the others.
//!
//! # Operations
//!
//! - **Resolve**: report the first match, or every match with
//!   [`MatchPolicy::All`]. With an [`OutputStyle`] the match is printed as a
//!   shell command (`source <path>` or `. <path>`) ready for `eval`.
//! - **List directories**: the candidate directories, optionally only the
//!   existing ones.
//! - **List paths**: `<dir>/<file>` for every candidate, optionally only the
//!   existing files.
//!
//! Reporting every match always prints bare paths, even when a shell style
//! was requested: a list of files cannot be sourced as one command.
//!
//! # Settings
//!
//! Project name, version, site directory, project directory and default mode
//! come from `WM_PROJECT`, `WM_PROJECT_VERSION`, `WM_PROJECT_SITE`,
//! `WM_PROJECT_DIR` and `FOAM_CONFIG_MODE`, layered over an optional strict
//! TOML settings file named by `ETCFILE_CONFIG`. See the [`env`] module.
//!
//! # Exit status
//!
//! `0` when something was found (or listed), `1` for usage and configuration
//! errors ([`EtcFileError`]), `2` when nothing was found.

pub mod env;
pub mod error;
pub mod types;

mod builder;
mod candidates;
mod cli;
mod identity;
mod report;
mod resolve;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{EtcFile, EtcFileBuilder, Locator};
pub use candidates::Layout;
pub use cli::{Cli, normalize_args, run};
pub use error::EtcFileError;
pub use identity::{Identity, Naming, VersionSource};
pub use report::{Outcome, Status};
pub use resolve::{Operation, OsProbe, Probe, Request};
pub use types::{MatchPolicy, OutputStyle, SearchMode, Tier};
