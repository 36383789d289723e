//! Percent-encoding of single wire tokens.
//!
//! Spaces travel as `+`, and every byte outside `A-Z a-z 0-9 * - . _` is
//! escaped, so `&`, `=`, `+`, `%`, `[` and `]` never appear raw inside a
//! token.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Percent-encodes a key segment or a value.
///
/// Returns the input unchanged when nothing needs escaping.
pub fn encode_token(token: &str) -> Cow<'_, str> {
    let mut chunks = form_urlencoded::byte_serialize(token.as_bytes());
    let Some(first) = chunks.next() else {
        return Cow::Borrowed(token);
    };
    if first == token {
        return Cow::Borrowed(token);
    }
    let mut encoded = String::with_capacity(token.len() + token.len() / 2);
    encoded.push_str(first);
    encoded.extend(chunks);
    Cow::Owned(encoded)
}

/// Reverses [`encode_token`]; also accepts `%20` for spaces.
///
/// Invalid UTF-8 after unescaping is replaced with U+FFFD.
pub fn decode_token(token: &str) -> Cow<'_, str> {
    if !token.contains(['+', '%']) {
        return Cow::Borrowed(token);
    }
    let spaced = token.replace('+', " ");
    Cow::Owned(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}
