//! Entity identifier sanitization
//!
//! Port only accepts identifiers matching `[A-Za-z0-9@_.:/=-]+`. Remote
//! records (team names in particular) routinely contain spaces and
//! punctuation, so every character outside that class is rewritten to `-`
//! before the value is used as an identifier or relation target.

use once_cell::sync::Lazy;
use regex::Regex;

static VALID_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@_.:/=-]+$").expect("valid identifier regex"));

static INVALID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9@_.:/=-]").expect("valid identifier regex"));

/// Rewrite `raw` into a valid Port entity identifier.
///
/// Returns the input unchanged when it already matches the allowed character
/// set; otherwise replaces each offending character with `-`. Idempotent.
pub fn sanitize(raw: &str) -> String {
    if VALID_IDENTIFIER.is_match(raw) {
        raw.to_string()
    } else {
        INVALID_CHARS.replace_all(raw, "-").into_owned()
    }
}
