//! Name canonicalization for identity comparison.
//!
//! Card names arrive in many shapes: exporter casing, curly apostrophes,
//! accented letters that differ across printings. The comparable form
//! collapses all of that; it is never shown to the user.

use unicode_normalization::UnicodeNormalization;

/// Canonical comparison form of a card name: NFKC, lowercase, every
/// non-alphanumeric run collapsed to a single space, trimmed.
pub fn normalize_name(name: &str) -> String {
    let folded = name.nfkc().collect::<String>().to_lowercase();
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
