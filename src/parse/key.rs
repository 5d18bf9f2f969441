use crate::error::{Error, Result};

/// Splits a single decoded key into its path segments.
///
/// The leading text before any bracket is the first segment, and each
/// `[...]` group contributes one more. Text between groups is folded into
/// the segment that follows it, so `a[b]c[d]` yields `a`, `bc`, `d`.
///
/// Once `max_depth` bracket groups have been opened, the remainder of the
/// key, starting at that opening bracket, becomes one final segment.
/// A `max_depth` of zero or less disables this cap.
///
/// ```
/// use qrystr::parse_key;
///
/// assert_eq!(parse_key("alpha[beta][gamma]", 0).unwrap(), ["alpha", "beta", "gamma"]);
/// assert_eq!(parse_key("a[b][c][d]", 2).unwrap(), ["a", "b", "[c][d]"]);
/// assert!(parse_key("alpha[[beta]", 0).is_err());
/// ```
pub fn parse_key(key: &str, max_depth: i32) -> Result<Vec<String>> {
    split(key, usize::try_from(max_depth).ok().filter(|d| *d > 0))
}

pub(crate) fn split(key: &str, limit: Option<usize>) -> Result<Vec<String>> {
    let mut in_brackets = false;
    let mut current = String::new();
    let mut segments = Vec::new();
    let mut depth = 0;

    for (idx, c) in key.char_indices() {
        match c {
            '[' if !in_brackets => {
                in_brackets = true;
                segments.push(std::mem::take(&mut current));
                depth += 1;

                if Some(depth) == limit {
                    tracing::debug!(key, depth, "max depth reached, keeping the rest of the key");
                    current.push_str(&key[idx..]);
                    break;
                }
            }
            ']' if in_brackets => in_brackets = false,
            '[' | ']' => return Err(Error::unbalanced(key)),
            _ => current.push(c),
        }
    }

    segments.push(current);
    Ok(segments)
}
