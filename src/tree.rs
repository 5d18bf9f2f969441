use crate::map::Map;
use crate::value::Value;

/// One element of the parsed tree.
///
/// A node is named by the path segment that leads to it, holds the values
/// stored at that path (possibly none) and owns its children. The root
/// node has an empty key and never holds values.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    key: String,
    values: Vec<Value>,
    children: Map<String, Node>,
}

/// A single trailing empty segment means "no subkey", so `["d", ""]`
/// addresses the same node as `["d"]`.
fn trim<'a, 'p>(path: &'a [&'p str]) -> &'a [&'p str] {
    match path {
        [rest @ .., ""] => rest,
        _ => path,
    }
}

impl Node {
    pub(crate) fn root() -> Self {
        Self::new(String::new())
    }

    fn new(key: String) -> Self {
        Node {
            key,
            values: Vec::new(),
            children: Map::default(),
        }
    }

    /// The path segment naming this node.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn child(&self, segment: &str) -> Option<&Node> {
        self.children.get(segment)
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    /// True when the node holds no values and has no children.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.children.is_empty()
    }

    /// Walks `path` from this node, creating any missing nodes on the way.
    ///
    /// Returns `None` only when the path is empty once a trailing empty
    /// segment has been dropped.
    pub(crate) fn navigate(&mut self, path: &[&str]) -> Option<&mut Node> {
        let path = trim(path);
        if path.is_empty() {
            return None;
        }

        let mut node = self;
        for segment in path {
            node = node
                .children
                .entry((*segment).to_owned())
                .or_insert_with(|| Node::new((*segment).to_owned()));
        }
        Some(node)
    }

    /// Walks `path` without creating anything.
    pub(crate) fn lookup(&self, path: &[&str]) -> Option<&Node> {
        let path = trim(path);
        if path.is_empty() {
            return None;
        }

        path.iter()
            .try_fold(self, |node, segment| node.children.get(*segment))
    }

    pub(crate) fn set_values(&mut self, values: Vec<Value>) {
        self.values = values;
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }
}
