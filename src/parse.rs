use std::borrow::Cow;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tree::Node;
use crate::value::Value;

mod decode;
mod key;

pub use self::key::parse_key;

/// Splits a raw querystring into decoded `(key, value)` pairs, in input order.
///
/// Empty pieces (`a=1&&b=2`) are skipped, a piece without `=` has an
/// empty value, and `;` is rejected rather than treated as a separator.
fn pairs(raw: &str) -> Result<Vec<(Cow<'_, str>, Cow<'_, str>)>> {
    let mut pairs = Vec::new();
    for piece in raw.split('&') {
        if piece.is_empty() {
            continue;
        }
        if piece.contains(';') {
            return Err(Error::invalid_query("invalid semicolon separator in query"));
        }
        let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
        pairs.push((decode::decode(key)?, decode::decode(value)?));
    }
    Ok(pairs)
}

/// Parses a raw querystring into a fresh tree.
///
/// The whole string is decoded before any key is split, so a malformed
/// escape anywhere wins over an unbalanced key. Nothing is returned on
/// error, not even the part of the tree built so far.
pub(crate) fn parse(raw: &str, config: &Config) -> Result<Node> {
    let pairs = pairs(raw)?;
    let limit = config.depth_limit();
    let mut root = Node::root();

    for (name, value) in &pairs {
        let segments = key::split(name, limit)?;
        tracing::trace!(key = %name, ?segments, "parsed key");

        let path: Vec<&str> = segments.iter().map(String::as_str).collect();
        match root.navigate(&path) {
            Some(node) => node.push(Value::String(value.to_string())),
            None => tracing::trace!(%value, "dropping value without a key"),
        }
    }

    tracing::debug!(
        pairs = pairs.len(),
        max_depth = ?limit,
        delimiter = ?config.delimiter(),
        "parsed query string"
    );
    #[cfg(feature = "debug_parsed")]
    tracing::debug!(tree = ?root, "parsed tree");

    Ok(root)
}

#[cfg(test)]
mod test {
    use super::{pairs, parse};
    use crate::{Config, Value};

    use pretty_assertions::assert_eq;

    #[test]
    fn pairs_in_input_order() {
        let parsed = pairs("b=1&a=2&&b=3&flag&=x").unwrap();
        let parsed: Vec<(&str, &str)> = parsed
            .iter()
            .map(|(k, v)| (&**k, &**v))
            .collect();
        assert_eq!(
            parsed,
            [("b", "1"), ("a", "2"), ("b", "3"), ("flag", ""), ("", "x")]
        );
    }

    #[test]
    fn pairs_split_on_first_equals() {
        let parsed = pairs("m[n]=o=p").unwrap();
        assert_eq!(parsed[0].0, "m[n]");
        assert_eq!(parsed[0].1, "o=p");
    }

    #[test]
    fn pairs_reject_semicolons() {
        assert!(pairs("a=1;b=2").unwrap_err().is_invalid_query());
    }

    #[test]
    fn parse_empty() {
        let root = parse("", &Config::default()).unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn parse_builds_tree() {
        let root = parse("a[b]=c", &Config::default()).unwrap();
        assert_eq!(root.key(), "");
        assert!(root.values().is_empty());

        let a = root.child("a").unwrap();
        assert_eq!(a.key(), "a");
        assert!(a.values().is_empty());

        let b = a.child("b").unwrap();
        assert_eq!(b.key(), "b");
        assert_eq!(b.values(), [Value::from("c")]);
        assert_eq!(b.children().count(), 0);
    }

    #[test]
    fn parse_drops_empty_keys() {
        let root = parse("=x&=y", &Config::default()).unwrap();
        assert!(root.values().is_empty());
        assert!(root.is_empty());

        // `[]` still names a child with an empty key
        let root = parse("[]=y", &Config::default()).unwrap();
        assert_eq!(root.child("").map(|n| n.values().len()), Some(1));
    }

    #[test]
    fn parse_decodes_before_splitting_keys() {
        let err = parse("a]=1&b=%zz", &Config::default()).unwrap_err();
        assert!(err.is_invalid_query(), "got: {err}");

        let err = parse("a]=1&b=2", &Config::default()).unwrap_err();
        assert!(err.is_unbalanced_brackets(), "got: {err}");
    }

    #[test]
    fn parse_encoded_brackets_are_structural() {
        let root = parse("a%5Bb%5D=c", &Config::default()).unwrap();
        assert_eq!(
            root.child("a").and_then(|a| a.child("b")).map(|b| b.values().len()),
            Some(1)
        );
    }
}
