//! CLI-specific transforms
//!
//! Alternative views of a source file, printed instead of a diff with `--transform`.
//! The token views show exactly what the reconstructor sees.

use crate::cli::TRANSFORM_NAMES;
use docfmt_core::{reconstruct, tokenize};

/// Execute a named transform on source text
pub fn execute_transform(source: &str, transform_name: &str, wrap_length: usize) -> Result<String, String> {
    match transform_name {
        "token-json" => {
            let tokens = tokenize(source).map_err(|e| format!("Transform failed: {e}"))?;
            serde_json::to_string_pretty(&tokens)
                .map(|json| json + "\n")
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "token-simple" => {
            let tokens = tokenize(source).map_err(|e| format!("Transform failed: {e}"))?;
            Ok(tokens.iter().map(|token| format!("{token}\n")).collect())
        }
        "formatted" => reconstruct(source, wrap_length).map_err(|e| format!("Transform failed: {e}")),
        _ => Err(format!(
            "Unknown transform: {transform_name} (available: {})",
            TRANSFORM_NAMES.join(", ")
        )),
    }
}
