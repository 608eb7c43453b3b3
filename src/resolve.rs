//! Resolution engine: walk the candidate directories for one request.
//!
//! Operates on an already-built candidate list and a [`Probe`] for existence
//! checks, so the whole engine runs against an in-memory filesystem in tests.
//! Three operations are supported:
//!
//! 1. [`Operation::ListDirs`]: the candidate directories themselves
//! 2. [`Operation::ListPaths`]: `<dir>/<file>` for every candidate
//! 3. [`Operation::Resolve`]: the first (or every) candidate holding `<file>`
//!
//! Listing operations only check existence in their `test` variant. An
//! [`MatchPolicy::All`] request always prints bare paths: a list of files is
//! not something a shell can source in one go.

use std::path::{Path, PathBuf};

use crate::report::{Outcome, Status};
use crate::types::{MatchPolicy, OutputStyle};

/// Filesystem existence checks.
pub trait Probe {
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// [`Probe`] backed by the real filesystem. I/O errors count as "absent".
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProbe;

impl Probe for OsProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// What to do with the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// List candidate directories; with `test`, only existing ones.
    ListDirs { test: bool },
    /// List `<dir>/<file_name>`; with `test`, only existing files.
    ListPaths { file_name: String, test: bool },
    /// Find `file_name` in the candidate directories.
    Resolve { file_name: String },
}

/// A fully validated resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub operation: Operation,
    pub style: Option<OutputStyle>,
    /// Echo `source <path>` to stderr for each match (shell styles only).
    pub verbose: bool,
    pub policy: MatchPolicy,
    /// Look under `config.csh/` or `config.sh/` to match the style.
    pub config_subdir: bool,
    /// Appended verbatim to shell directives.
    pub pass_through: Vec<String>,
}

impl Request {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            style: None,
            verbose: false,
            policy: MatchPolicy::FirstOnly,
            config_subdir: false,
            pass_through: Vec::new(),
        }
    }

    /// Output style actually in effect: `All` turns shell formatting off.
    pub fn effective_style(&self) -> Option<OutputStyle> {
        match self.policy {
            MatchPolicy::All => None,
            MatchPolicy::FirstOnly => self.style,
        }
    }
}

/// Run `request` against `dirs`.
pub fn resolve(dirs: &[PathBuf], request: &Request, probe: &impl Probe) -> Outcome {
    match &request.operation {
        Operation::ListDirs { test } => {
            let paths = dirs
                .iter()
                .filter(|dir| !test || probe.is_dir(dir))
                .cloned()
                .collect();
            listing(paths, *test)
        }
        Operation::ListPaths { file_name, test } => {
            let paths = dirs
                .iter()
                .map(|dir| join_name(dir, file_name))
                .filter(|path| !test || probe.is_file(path))
                .collect();
            listing(paths, *test)
        }
        Operation::Resolve { file_name } => find(dirs, file_name, request, probe),
    }
}

fn listing(paths: Vec<PathBuf>, test: bool) -> Outcome {
    let status = if test && paths.is_empty() {
        Status::NotFound
    } else {
        Status::Found
    };
    let lines = paths.iter().map(|p| p.display().to_string()).collect();
    Outcome {
        paths,
        lines,
        diagnostics: Vec::new(),
        status,
    }
}

fn find(dirs: &[PathBuf], file_name: &str, request: &Request, probe: &impl Probe) -> Outcome {
    let style = request.effective_style();
    let file_name = match style {
        Some(style) if request.config_subdir => with_config_dir(file_name, style),
        _ => file_name.to_string(),
    };

    let found = dirs
        .iter()
        .map(|dir| join_name(dir, &file_name))
        .filter(|path| probe.is_file(path));
    let paths: Vec<PathBuf> = match request.policy {
        MatchPolicy::FirstOnly => found.take(1).collect(),
        MatchPolicy::All => found.collect(),
    };

    let mut lines = Vec::with_capacity(paths.len());
    let mut diagnostics = Vec::new();
    for path in &paths {
        tracing::debug!(path = %path.display(), "matched");
        match style {
            Some(style) => {
                if request.verbose {
                    diagnostics.push(format!("source {}", path.display()));
                }
                lines.push(directive_line(style, path, &request.pass_through));
            }
            None => lines.push(path.display().to_string()),
        }
    }

    let status = if paths.is_empty() {
        Status::NotFound
    } else {
        Status::Found
    };
    Outcome {
        paths,
        lines,
        diagnostics,
        status,
    }
}

/// `<dir>/<name>`, or `<dir>` for an empty name. The name is always taken
/// relative to `dir`, even with a leading `/`.
fn join_name(dir: &Path, name: &str) -> PathBuf {
    let name = name.trim_start_matches('/');
    if name.is_empty() {
        dir.to_path_buf()
    } else {
        dir.join(name)
    }
}

fn with_config_dir(file_name: &str, style: OutputStyle) -> String {
    let already_placed = file_name.starts_with('/')
        || [OutputStyle::Csh, OutputStyle::Sh]
            .iter()
            .any(|s| file_name.starts_with(&format!("{}/", s.config_dir())));
    if already_placed {
        file_name.to_string()
    } else {
        format!("{}/{file_name}", style.config_dir())
    }
}

fn directive_line(style: OutputStyle, path: &Path, pass_through: &[String]) -> String {
    let mut line = format!("{}{}", style.directive(), path.display());
    for arg in pass_through {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
