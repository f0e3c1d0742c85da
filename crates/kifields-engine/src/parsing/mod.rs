//! Tolerant scanner for the `field_names` notation.
//!
//! The notation never nests beyond `(templatefields (field ...) ...)`, so
//! rather than a general S-expression parser this module scans the text
//! for every well-formed `(field ...)` pair and ignores everything else.
//! Malformed or empty input therefore degrades to fewer (or zero) entries
//! instead of an error.

use crate::models::Field;
use regex::Regex;

#[cfg(test)]
mod roundtrip_tests;

/// Matches one `(field (name "NAME") FLAGS)` pair. Group 1 is the quoted
/// name (escaped quotes and backslashes allowed), group 2 is everything up
/// to this entry's closing paren, captured verbatim.
fn field_pattern() -> &'static Regex {
    use std::sync::OnceLock;

    static FIELD_RE: OnceLock<Regex> = OnceLock::new();
    FIELD_RE.get_or_init(|| {
        Regex::new(r#"(?s)\(field\s+\(name\s+"((?:[^"\\]|\\.)*)"\)([^)]*)\)"#)
            .expect("Invalid field pattern")
    })
}

/// Parse a `field_names` value into its ordered entries.
///
/// The scan spans line boundaries and tolerates absent flags, variable
/// spacing and stray text outside the `(field ...)` pattern. The raw flag
/// text is captured as-is, leading whitespace included; it is only
/// normalized when the entry is serialized again.
pub fn parse_field_names(sexpr: &str) -> Vec<Field> {
    field_pattern()
        .captures_iter(sexpr)
        .map(|caps| Field::with_flags(unescape_name(&caps[1]), &caps[2]))
        .collect()
}

/// Unescape `\"` and `\\` as stored inside the quoted name.
pub fn unescape_name(name: &str) -> String {
    name.replace(r#"\""#, "\"").replace(r"\\", "\\")
}

/// Escape a name for embedding in the notation. Backslashes go first so a
/// literal backslash is not double-escaped by the quote step.
pub fn escape_name(name: &str) -> String {
    name.replace('\\', r"\\").replace('"', r#"\""#)
}
