//! URL assembly for URLForge.
//!
//! A pure function from (base URL, ordered parameter rows) to the final URL
//! string. Keys are always percent-encoded; values only when the row's encode
//! flag is set. The base URL is taken verbatim — no syntax validation beyond
//! the emptiness check.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::builder::{Assembly, ParamEntry};

/// Characters escaped when encoding a query component.
///
/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )`, matching
/// the component encoding browsers apply to query strings.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, QUERY_COMPONENT).to_string()
}

/// Assemble the final URL from the base URL and the ordered parameter rows.
///
/// Rows are emitted in order. A row with an empty trimmed key is skipped
/// entirely; duplicate keys are all kept. Pairs are joined with `&` and the
/// query string is prefixed with `?` only when at least one pair was emitted.
///
/// Returns [`Assembly::MissingBase`] when the trimmed base URL is empty.
pub fn assemble(base_url: &str, params: &[ParamEntry]) -> Assembly {
    let base = base_url.trim();
    if base.is_empty() {
        return Assembly::MissingBase;
    }

    let pairs: Vec<String> = params
        .iter()
        .filter_map(|entry| {
            let key = entry.key.trim();
            if key.is_empty() {
                return None;
            }
            let value = entry.value.trim();
            let encoded_key = encode_component(key);
            let encoded_value = if entry.encode {
                encode_component(value)
            } else {
                value.to_string()
            };
            Some(format!("{}={}", encoded_key, encoded_value))
        })
        .collect();

    if pairs.is_empty() {
        Assembly::Url(base.to_string())
    } else {
        Assembly::Url(format!("{}?{}", base, pairs.join("&")))
    }
}
