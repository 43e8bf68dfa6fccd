//! Command-line interface for docfmt
//! Formats the docstrings of Python files, printing unified diffs or rewriting the files.
//!
//! Usage:
//!   docfmt `<files>...`                         - Print a diff for every file that would change
//!   docfmt --in-place `<files>...`              - Rewrite files, keeping `<file>.backup` copies
//!   docfmt --check `<files>...`                 - List files that would change, exit 1 if any
//!   docfmt --transform token-json `<file>`      - Print the token stream the formatter sees
//!
//! Settings are layered: built-in defaults, then `docfmt.toml` in the working directory (or
//! the file given with `--config`), then command-line flags.

mod cli;
mod diff;
mod files;
mod logging;
mod transforms;

use clap::ArgMatches;
use docfmt_config::{ConfigError, DocfmtConfig, Loader, PROJECT_CONFIG_FILE};
use docfmt_core::{reconstruct, FormatError};
use files::{backup_path, FileError, SourceFile};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
enum ProcessError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("{0}")]
    Transform(String),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// What to do with each file once it has been formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Diff,
    Check,
    InPlace { backup_suffix: Option<String> },
    Transform(String),
}

/// Result of processing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Changed,
    Failed,
}

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_count("verbose"));

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("docfmt: configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mode = select_mode(&matches, &config);
    let wrap_length = config.formatting.wrap_summaries;
    debug!(?mode, wrap_length, "configuration loaded");

    let mut failed = false;
    let mut changed = false;
    for path in matches.get_many::<String>("files").into_iter().flatten() {
        match handle_file(Path::new(path), &mode, wrap_length) {
            Outcome::Unchanged => {}
            Outcome::Changed => changed = true,
            Outcome::Failed => failed = true,
        }
    }

    if failed || (changed && mode == Mode::Check) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Layer defaults, the project or explicit config file and the flags.
fn load_config(matches: &ArgMatches) -> Result<DocfmtConfig, ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(PROJECT_CONFIG_FILE),
    };

    if matches.get_flag("in-place") {
        loader = loader.set_override("output.in_place", true)?;
    }
    if matches.get_flag("no-backup") {
        loader = loader.set_override("output.backup", false)?;
    }
    if let Some(&length) = matches.get_one::<usize>("wrap-long-summaries") {
        let length = i64::try_from(length).unwrap_or(i64::MAX);
        loader = loader.set_override("formatting.wrap_summaries", length)?;
    }
    loader.build()
}

fn select_mode(matches: &ArgMatches, config: &DocfmtConfig) -> Mode {
    if let Some(name) = matches.get_one::<String>("transform") {
        return Mode::Transform(name.clone());
    }
    if matches.get_flag("check") {
        return Mode::Check;
    }
    if config.output.in_place {
        let backup_suffix = config
            .output
            .backup
            .then(|| config.output.backup_suffix.clone());
        return Mode::InPlace { backup_suffix };
    }
    Mode::Diff
}

/// Process one file, reporting failures on stderr.
fn handle_file(path: &Path, mode: &Mode, wrap_length: usize) -> Outcome {
    match process_file(path, mode, wrap_length) {
        Ok(true) => Outcome::Changed,
        Ok(false) => Outcome::Unchanged,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping file");
            eprintln!("docfmt: {}: {e}", path.display());
            Outcome::Failed
        }
    }
}

/// Returns whether formatting changes the file.
fn process_file(path: &Path, mode: &Mode, wrap_length: usize) -> Result<bool, ProcessError> {
    let source = SourceFile::read(path)?;
    debug!(path = %path.display(), encoding = %source.encoding, "read source");

    if let Mode::Transform(name) = mode {
        let output = transforms::execute_transform(&source.text, name, wrap_length)
            .map_err(ProcessError::Transform)?;
        io::stdout().write_all(output.as_bytes())?;
        return Ok(false);
    }

    let formatted = reconstruct(&source.text, wrap_length)?;
    if formatted == source.text {
        debug!(path = %path.display(), "already formatted");
        return Ok(false);
    }

    match mode {
        Mode::Diff => {
            let name = path.display().to_string();
            let diff = diff::unified_diff(&name, &source.text, &formatted);
            io::stdout().write_all(diff.as_bytes())?;
        }
        Mode::Check => {
            println!("would reformat {}", path.display());
        }
        Mode::InPlace { backup_suffix } => {
            if let Some(suffix) = backup_suffix {
                let backup = backup_path(path, suffix);
                source.write_as(&backup, &source.text)?;
                debug!(backup = %backup.display(), "wrote backup");
            }
            source.write_as(path, &formatted)?;
            info!(path = %path.display(), "reformatted");
        }
        Mode::Transform(_) => {}
    }
    Ok(true)
}
