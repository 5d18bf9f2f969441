use crate::Qs;
use crate::error::Result;

/// Configuration for parsing and addressing a querystring.
///
/// ## Nesting Depth
///
/// The `max_depth` parameter caps how many segments a key is split into.
/// The bracket group that reaches the cap starts the last segment, which
/// keeps the rest of the key verbatim, brackets and all. This keeps
/// maliciously deep keys from producing arbitrarily deep trees.
///
/// A `max_depth` of zero or less disables the cap entirely.
///
/// Default value: `max_depth = 5`
///
/// ```
/// use qrystr::Config;
///
/// let qs = Config::new().max_depth(2).parse("a[b][c][d]=1").unwrap();
/// assert_eq!(qs.get_string(&["a", "b", "[c][d]"]), "1");
///
/// let qs = Config::new().max_depth(0).parse("a[b][c][d]=1").unwrap();
/// assert_eq!(qs.get_string(&["a", "b", "c", "d"]), "1");
/// ```
///
/// ## Path Delimiter
///
/// By default every path-taking method expects the path already split into
/// segments. With a delimiter set, the first element of the path is split
/// on it instead, so `"a.b"` addresses the same node as `["a", "b"]`.
///
/// ```
/// use qrystr::Config;
///
/// let qs = Config::new().path_delimiter(".").parse("a[b]=1").unwrap();
/// assert_eq!(qs.get_string(&["a.b"]), "1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    max_depth: i32,
    path_delimiter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            max_depth: 5,
            path_delimiter: None,
        }
    }

    /// Specifies the bracket group at which the remainder of a key is
    /// frozen into one segment. Default is 5; zero or a
    /// negative value means unlimited.
    pub const fn max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Splits single-string paths on `delimiter`. An empty delimiter
    /// turns splitting off.
    pub fn path_delimiter<T: Into<String>>(mut self, delimiter: T) -> Self {
        let delimiter = delimiter.into();
        self.path_delimiter = if delimiter.is_empty() {
            None
        } else {
            Some(delimiter)
        };
        self
    }

    /// The configured depth cap, `None` when parsing is unlimited.
    pub fn depth_limit(&self) -> Option<usize> {
        usize::try_from(self.max_depth).ok().filter(|d| *d > 0)
    }

    pub fn delimiter(&self) -> Option<&str> {
        self.path_delimiter.as_deref()
    }

    /// Parses a querystring using this `Config`.
    pub fn parse(self, input: &str) -> Result<Qs> {
        Qs::with_config(input, self)
    }
}
