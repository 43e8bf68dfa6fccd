//! Formatting
//!
//!     Everything downstream of the token stream:
//!         - [reconstructor](reconstructor) walks the tokens and rebuilds the source text.
//!         - [docstring](docstring) builds the canonical text of one docstring.
//!         - [summary](summary) splits contents and normalizes the summary line.
//!         - [wrap](wrap) is the greedy line filler used for long summaries.

pub mod docstring;
pub mod reconstructor;
pub mod summary;
pub mod wrap;

pub use docstring::{format_docstring, indent_non_indented, strip_docstring};
pub use reconstructor::{is_docstring_candidate, reconstruct, reconstruct_with};
pub use summary::{normalize_summary, split_summary_and_description};
pub use wrap::wrap;
