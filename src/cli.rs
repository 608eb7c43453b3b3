//! Command-line front end.
//!
//! The tool keeps the traditional single-dash long options (`-list`,
//! `-mode=ugo`, `-csh-verbose`). [`normalize_args`] rewrites them into the
//! double-dash form clap expects before parsing, and marks the end of options
//! at the first positional argument so that pass-through arguments such as
//! `-x` reach the shell directive untouched.
//!
//! Parsed arguments are turned into a [`Request`] by [`Cli::request`]; all
//! argument-count checks happen there, before any directory is looked at.
//! [`run`] wires settings, builder, engine and output together and returns
//! the process exit status.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind as ClapErrorKind};
use tracing_subscriber::EnvFilter;

use crate::builder::EtcFile;
use crate::env;
use crate::error::EtcFileError;
use crate::report::Outcome;
use crate::resolve::{Operation, OsProbe, Request};
use crate::types::{MatchPolicy, OutputStyle, SearchMode};

/// Filter directives for diagnostic logging, e.g. `ETCFILE_LOG=debug`.
pub const LOG_ENV: &str = "ETCFILE_LOG";

/// Options that take a value, without their leading dashes.
const VALUE_OPTIONS: [&str; 6] = ["m", "mode", "p", "prefix", "v", "version"];

const AFTER_HELP: &str = "\
Locate user/group/shipped files, searching ~/.OpenFOAM, the site directory
and the project etc/ directory in that order.

The options can also be given as a single character (eg, '-q' instead of
'-quiet'), but must not be grouped.

Exit status:
  0  found (or listed)
  1  usage or configuration error
  2  not found";

/// Locate per-user, site-wide and shipped configuration files.
#[derive(Debug, Parser)]
#[command(
    name = "etcfile",
    disable_version_flag = true,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Return all files, not just the first match (disables shell output).
    #[arg(short, long)]
    pub all: bool,

    /// List the directories to be searched, or the candidate file paths.
    #[arg(short, long)]
    pub list: bool,

    /// Like -list, but only the directories or files that exist.
    #[arg(long)]
    pub list_test: bool,

    /// Any combination of u(user), g(group), o(other).
    #[arg(short, long, value_name = "MODE", value_parser = parse_mode)]
    pub mode: Option<SearchMode>,

    /// Alternative installation prefix.
    #[arg(short, long, value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// Alternative project version.
    #[arg(short = 'v', long = "version", value_name = "VER")]
    pub project_version: Option<String>,

    /// Output a csh `source` command for the file.
    #[arg(long, overrides_with_all = ["sh", "csh_verbose", "sh_verbose"])]
    pub csh: bool,

    /// Output an sh `.` command for the file.
    #[arg(long, overrides_with_all = ["csh", "csh_verbose", "sh_verbose"])]
    pub sh: bool,

    /// As -csh, also reporting the sourced file on stderr.
    #[arg(long, overrides_with_all = ["csh", "sh", "sh_verbose"])]
    pub csh_verbose: bool,

    /// As -sh, also reporting the sourced file on stderr.
    #[arg(long, overrides_with_all = ["csh", "sh", "csh_verbose"])]
    pub sh_verbose: bool,

    /// Look under config.csh/ or config.sh/ to match the shell output.
    #[arg(long)]
    pub config: bool,

    /// Suppress all normal output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Suppress stderr output (except -csh-verbose/-sh-verbose).
    #[arg(short, long)]
    pub silent: bool,

    /// File name, then arguments passed through to the shell command.
    #[arg(value_name = "FILE", trailing_var_arg = true)]
    pub args: Vec<String>,
}

fn parse_mode(s: &str) -> Result<SearchMode, String> {
    s.parse().map_err(|e: EtcFileError| e.to_string())
}

impl Cli {
    /// Requested shell style and whether it is verbose.
    fn shell_style(&self) -> Option<(OutputStyle, bool)> {
        if self.csh {
            Some((OutputStyle::Csh, false))
        } else if self.sh {
            Some((OutputStyle::Sh, false))
        } else if self.csh_verbose {
            Some((OutputStyle::Csh, true))
        } else if self.sh_verbose {
            Some((OutputStyle::Sh, true))
        } else {
            None
        }
    }

    /// Validate the positional arguments and build the engine request.
    ///
    /// A leading `~<project>/` on the file name is dropped.
    pub fn request(&self, project: &str) -> Result<Request, EtcFileError> {
        let alias = format!("~{project}/");
        let file_name = |name: &String| name.strip_prefix(&alias).unwrap_or(name).to_string();
        let style = self.shell_style();
        let given = self.args.len();

        let (operation, pass_through) = if self.list || self.list_test {
            let test = self.list_test;
            let operation = match self.args.as_slice() {
                [] => Operation::ListDirs { test },
                [name] => Operation::ListPaths {
                    file_name: file_name(name),
                    test,
                },
                _ => {
                    return Err(EtcFileError::Usage(format!(
                        "-list expects at most one file name, {given} given"
                    )));
                }
            };
            (operation, Vec::new())
        } else {
            let Some((name, rest)) = self.args.split_first() else {
                return Err(EtcFileError::Usage("No file name specified".into()));
            };
            if style.is_none() && !rest.is_empty() {
                return Err(EtcFileError::Usage(format!(
                    "One file name expected, {given} given"
                )));
            }
            let operation = Operation::Resolve {
                file_name: file_name(name),
            };
            (operation, rest.to_vec())
        };

        Ok(Request {
            operation,
            style: style.map(|(style, _)| style),
            verbose: style.is_some_and(|(_, verbose)| verbose),
            policy: if self.all {
                MatchPolicy::All
            } else {
                MatchPolicy::FirstOnly
            },
            config_subdir: self.config,
            pass_through,
        })
    }

    fn execute(&self) -> Result<Outcome, EtcFileError> {
        let settings = env::load()?;
        let request = self.request(&settings.project)?;

        let mut builder = EtcFile::builder().settings(&settings);
        if let Some(prefix) = &self.prefix {
            builder = builder.prefix(prefix);
        }
        if let Some(version) = &self.project_version {
            builder = builder.version(version);
        }
        if let Some(mode) = self.mode {
            builder = builder.mode(mode);
        }
        let locator = builder.build()?;

        Ok(locator.resolve(&request, &OsProbe))
    }
}

/// Rewrite single-dash long options to double-dash and insert `--` before
/// the first positional argument.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str().map(str::to_owned) else {
            normalized.push("--".into());
            normalized.push(arg);
            break;
        };
        if text == "--" {
            normalized.push(arg);
            break;
        }
        if !text.starts_with('-') || text.len() == 1 {
            normalized.push("--".into());
            normalized.push(arg);
            break;
        }

        let name = text.trim_start_matches('-');
        let (name, inline_value) = match name.split_once('=') {
            Some((name, _)) => (name, true),
            None => (name, false),
        };
        let takes_next = !inline_value && VALUE_OPTIONS.contains(&name);

        if !text.starts_with("--") && name.len() > 1 {
            normalized.push(format!("-{text}").into());
        } else {
            normalized.push(arg);
        }
        if takes_next && let Some(value) = args.next() {
            normalized.push(value);
        }
    }

    normalized.extend(args);
    normalized
}

/// Whether `-quiet`/`-silent` appear among the options, for errors raised
/// before parsing completes.
fn errors_suppressed(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .filter_map(|arg| arg.to_str())
        .take_while(|arg| *arg != "--")
        .any(|arg| matches!(arg, "-q" | "--quiet" | "-s" | "--silent"))
}

fn init_logging(silent: bool) {
    if silent {
        return;
    }
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn report_error(err: &EtcFileError) {
    eprintln!("etcfile: {err}");
    if let EtcFileError::UnknownKeys(errors) = err {
        for inner in errors {
            eprintln!("  {inner}");
        }
    }
}

/// Run the tool on `args` (program name first) and return the exit status.
pub fn run<I>(args: I) -> i32
where
    I: IntoIterator<Item = OsString>,
{
    let args = normalize_args(args);
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                ClapErrorKind::DisplayHelp => match err.print() {
                    Ok(()) => 0,
                    Err(_) => 1,
                },
                _ => {
                    if !errors_suppressed(&args) {
                        eprint!("{err}");
                    }
                    1
                }
            };
        }
    };

    init_logging(cli.silent);

    match cli.execute() {
        Ok(outcome) => {
            let emitted = outcome.emit(
                cli.quiet,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            );
            match emitted {
                Ok(()) => outcome.status.exit_code(),
                Err(_) => 1,
            }
        }
        Err(err) => {
            if !(cli.quiet || cli.silent) {
                report_error(&err);
            }
            err.exit_code()
        }
    }
}
