//! Natural-key derivation for stored entities.
//!
//! Ids are never chosen by callers. They are recomputed from the
//! identity-affecting fields whenever those fields change, so two records
//! with the same identity inputs collide in storage.

/// Derives a language id: lowercased name, `_`, version as given.
///
/// Empty inputs are not sanitized: `derive_language_id("", "")` is `"_"`.
pub fn derive_language_id(name: &str, version: &str) -> String {
    format!("{}_{}", name.to_lowercase(), version)
}

/// Derives a compare id: every whitespace-delimited token of `name`,
/// lowercased, joined with `_`.
///
/// Runs of whitespace collapse, so `"foo  bar"` and `"foo bar"` share an id.
/// An empty or all-whitespace name yields an empty id.
pub fn derive_compare_id(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
