//! Outcome of a resolution and how it reaches stdout/stderr.

use std::io::{self, Write};
use std::path::PathBuf;

/// Whether anything was found (or listed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Found,
    NotFound,
}

impl Status {
    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Found => 0,
            Status::NotFound => 2,
        }
    }
}

/// Result of one run of the resolution engine. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Resolved (or listed) paths, in candidate order.
    pub paths: Vec<PathBuf>,
    /// One stdout line per entry in `paths`.
    pub lines: Vec<String>,
    /// Verbose diagnostics for stderr.
    pub diagnostics: Vec<String>,
    pub status: Status,
}

impl Outcome {
    /// Write the outcome. `quiet` drops stdout; diagnostics always go out,
    /// since they were asked for explicitly.
    pub fn emit(&self, quiet: bool, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        for line in &self.diagnostics {
            writeln!(err, "{line}")?;
        }
        if !quiet {
            for line in &self.lines {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }
}
