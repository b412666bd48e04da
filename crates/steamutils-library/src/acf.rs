//! Manifest (`.acf`) text parsing
//!
//! Steam manifests are brace-delimited key/value files:
//!
//! ```text
//! "AppState"
//! {
//!     "appid"        "220"
//!     "name"         "Half-Life 2"
//!     "UserConfig"
//!     {
//!         "language" "english"
//!     }
//! }
//! ```
//!
//! The parser does not follow the structure. It pulls every line carrying
//! exactly one quoted key and one quoted value into a flat map.

use std::collections::BTreeMap;

/// Parse manifest text into a flat key/value map
///
/// Lines with zero, one or more than two quoted tokens are skipped, as are
/// braces and section headers. A later duplicate key replaces the earlier
/// value. Never fails; malformed input gives an empty map.
pub fn parse_manifest(contents: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    for line in contents.lines() {
        if let Some((key, value)) = extract_pair(line) {
            fields.insert(key.to_string(), value.to_string());
        }
    }

    fields
}

/// Extract a key/value pair from a line holding exactly two quoted tokens
fn extract_pair(line: &str) -> Option<(&str, &str)> {
    let tokens = quoted_tokens(line);
    match tokens.as_slice() {
        [key, value] => Some((key, value)),
        _ => None,
    }
}

/// Collect the contents of each closed `"..."` span, left to right
///
/// An unterminated trailing quote does not form a token.
fn quoted_tokens(line: &str) -> Vec<&str> {
    let parts: Vec<&str> = line.split('"').collect();
    let closed = (parts.len() - 1) / 2;

    parts.iter().skip(1).step_by(2).take(closed).copied().collect()
}
