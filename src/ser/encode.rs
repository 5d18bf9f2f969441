use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Everything except the URL-unreserved characters gets percent-encoded:
/// ASCII alphanumerics, `-`, `_`, `.` and `~` pass through.
///
/// Space is left out of the set so it can be written as `+` instead.
/// Brackets, `=`, `&` and `+` are all encoded, so an encoded key never
/// contains querystring syntax.
const QUERY_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b' ');

/// Encodes text for use as a querystring key or value.
///
/// The function returns an iterator to avoid allocations when no encoding is needed.
pub fn encode(s: &str) -> impl Iterator<Item = Cow<'_, str>> + '_ {
    percent_encoding::utf8_percent_encode(s, QUERY_ESCAPE_SET).map(|chunk| {
        if chunk.contains(' ') {
            Cow::Owned(chunk.replace(' ', "+"))
        } else {
            Cow::Borrowed(chunk)
        }
    })
}
