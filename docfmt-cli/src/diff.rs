//! Unified diffs between the original and the formatted text

use similar::TextDiff;

/// Render a unified diff with `before/<name>` and `after/<name>` headers.
///
/// Returns an empty string when the texts are equal.
pub fn unified_diff(name: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }
    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header(&format!("before/{name}"), &format!("after/{name}"))
        .to_string()
}
