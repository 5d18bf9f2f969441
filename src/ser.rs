//! Writing a tree back out as a querystring.

mod encode;

use std::fmt::{self, Write};

use encode::encode;

use crate::tree::Node;
use crate::value::Value;

/// Writes every value in the tree as a `key=value` pair, joined by `&`.
///
/// Keys are rebuilt in bracket notation from the path leading to each
/// node (`a[b][c]`), with the root contributing nothing. A node's own
/// values are written before those of its children. When `encoded` is
/// set, the whole key and each value are percent-encoded, so brackets
/// come out as `%5B` and `%5D`.
///
/// The output parses back into the same tree: a segment frozen at the
/// depth cap (`[f][g]`) is written as-is, and values held by a node with
/// an empty key get one more `[]`, which the parser strips again.
pub(crate) fn write_tree<W: Write>(writer: &mut W, root: &Node, encoded: bool) -> fmt::Result {
    let mut tree_writer = TreeWriter::new(writer, encoded);
    for value in root.values() {
        tree_writer.write_value(value)?;
    }
    for child in root.children() {
        tree_writer.visit(child, true)?;
    }
    Ok(())
}

/// The writer keeps the key of the node being visited as a stack of
/// segments. For example, when visiting `{a: {b: "c"}}`, it pushes `a`,
/// then `[b]`, writes `a[b]=c` and pops back out.
struct TreeWriter<'w, W: Write> {
    writer: &'w mut W,
    first_kv: bool,
    key: String,
    encoded: bool,
}

impl<'w, W: Write> TreeWriter<'w, W> {
    fn new(writer: &'w mut W, encoded: bool) -> Self {
        Self {
            writer,
            first_kv: true,
            key: String::with_capacity(32),
            encoded,
        }
    }

    fn visit(&mut self, node: &Node, top_level: bool) -> fmt::Result {
        let mark = self.key.len();
        self.push_key(node.key(), top_level);

        if !node.values().is_empty() {
            let inner = self.key.len();
            if node.key().is_empty() {
                self.push_brackets("");
            }
            for value in node.values() {
                self.write_value(value)?;
            }
            self.key.truncate(inner);
        }
        for child in node.children() {
            self.visit(child, false)?;
        }

        self.key.truncate(mark);
        Ok(())
    }

    /// Appends a segment to the current key:
    /// - First segment "user" becomes: `user`
    /// - Second segment "name" becomes: `user[name]`
    /// - A frozen segment "[a][b]" stays: `user[a][b]`
    fn push_key(&mut self, segment: &str, first_key_segment: bool) {
        if first_key_segment || segment.starts_with('[') {
            self.push_segment(segment);
        } else {
            self.push_brackets(segment);
        }
    }

    fn push_brackets(&mut self, segment: &str) {
        self.key.push_str(if self.encoded { "%5B" } else { "[" });
        self.push_segment(segment);
        self.key.push_str(if self.encoded { "%5D" } else { "]" });
    }

    fn push_segment(&mut self, segment: &str) {
        if self.encoded {
            self.key.extend(encode(segment));
        } else {
            self.key.push_str(segment);
        }
    }

    fn write_value(&mut self, value: &Value) -> fmt::Result {
        if self.first_kv {
            self.first_kv = false;
        } else {
            self.writer.write_char('&')?;
        }
        self.writer.write_str(&self.key)?;
        self.writer.write_char('=')?;

        if self.encoded {
            let text = value.to_string();
            for chunk in encode(&text) {
                self.writer.write_str(&chunk)?;
            }
            Ok(())
        } else {
            write!(self.writer, "{value}")
        }
    }
}
