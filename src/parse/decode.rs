use std::borrow::Cow;

use crate::error::{Error, Result};

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).map(|d| d as u8)
}

/// Decodes one key or value of a querystring:
/// - Replaces `+` with a space
/// - Decodes percent-encoded bytes
/// - Checks the result is UTF-8
///
/// Unlike form decoders that pass a stray `%` through untouched, a `%`
/// that is not followed by two hex digits is an error.
pub fn decode(input: &str) -> Result<Cow<'_, str>> {
    if !input.bytes().any(|b| b == b'+' || b == b'%') {
        return Ok(Cow::Borrowed(input));
    }

    let bytes = input.as_bytes();
    let mut bytes_iter = bytes.iter().enumerate();

    let mut decoded = Vec::with_capacity(bytes.len());
    let mut last_segment = 0;

    while let Some((idx, &b)) = bytes_iter.next() {
        if b == b'+' {
            decoded.extend_from_slice(&bytes[last_segment..idx]);
            decoded.push(b' ');
            last_segment = idx + 1;
        } else if b == b'%' {
            let h = bytes_iter.next().and_then(|(_, b)| char_to_digit(*b));
            let l = bytes_iter.next().and_then(|(_, b)| char_to_digit(*b));
            let (Some(h), Some(l)) = (h, l) else {
                let escape = &bytes[idx..bytes.len().min(idx + 3)];
                return Err(Error::invalid_query(format!(
                    "invalid URL escape \"{}\"",
                    String::from_utf8_lossy(escape)
                )));
            };

            decoded.extend_from_slice(&bytes[last_segment..idx]);
            decoded.push(h * 0x10 + l);
            last_segment = idx + 3;
        }
    }

    decoded.extend_from_slice(&bytes[last_segment..]);
    String::from_utf8(decoded)
        .map(Cow::Owned)
        .map_err(|_| Error::invalid_query("decoded text is not valid UTF-8"))
}
