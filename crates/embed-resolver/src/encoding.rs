//! URL component encoding with browser `encodeURIComponent` semantics

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Characters left unescaped by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component (`/` becomes `%2F`)
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Strictly decode a percent-encoded component
///
/// Returns `None` on a truncated or non-hex escape, or when the decoded
/// bytes are not valid UTF-8.
#[must_use]
pub fn decode_component(input: &str) -> Option<Cow<'_, str>> {
    if !escapes_well_formed(input) {
        return None;
    }
    percent_decode_str(input).decode_utf8().ok()
}

/// Decode, falling back to the raw input when decoding fails
#[must_use]
pub fn decode_lenient(input: &str) -> Cow<'_, str> {
    decode_component(input).unwrap_or(Cow::Borrowed(input))
}

fn escapes_well_formed(input: &str) -> bool {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !well_formed {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
