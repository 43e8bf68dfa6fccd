// Shared with build.rs, which includes this file to generate shell completions.
// Keep it free of crate-local imports.

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, Command, ValueHint};

/// Names accepted by `--transform`.
pub const TRANSFORM_NAMES: &[&str] = &["token-json", "token-simple", "formatted"];

/// The `docfmt` command line.
pub fn build_cli() -> Command {
    Command::new("docfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Formats docstrings to follow PEP 257")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .help("Files to format")
                .required(true)
                .num_args(1..)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("in-place")
                .long("in-place")
                .short('i')
                .help("Make changes to files instead of printing diffs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-backup")
                .long("no-backup")
                .help("Do not write backup files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("wrap-long-summaries")
                .long("wrap-long-summaries")
                .value_name("LENGTH")
                .help("Wrap long summary lines at this length (default: 0, no wrapping)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Configuration file layered over the built-in defaults")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Report files that would change and exit with 1 if any; write nothing")
                .action(ArgAction::SetTrue)
                .conflicts_with("in-place"),
        )
        .arg(
            Arg::new("transform")
                .long("transform")
                .short('t')
                .value_name("NAME")
                .help("Print a transform of each file instead of a diff")
                .value_parser(PossibleValuesParser::new(TRANSFORM_NAMES.iter().copied()))
                .conflicts_with_all(["in-place", "check"]),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Raise log verbosity (repeatable); RUST_LOG takes precedence")
                .action(ArgAction::Count),
        )
}
