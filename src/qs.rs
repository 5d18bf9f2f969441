use std::fmt;
use std::io::Write;
use std::str::FromStr;

use parking_lot::RwLock;
use serde::Deserialize;
use serde::de::{DeserializeOwned, value::SeqDeserializer};

use crate::config::Config;
use crate::error::Result;
use crate::parse;
use crate::ser;
use crate::tree::Node;
use crate::value::{Value, ValueDeserializer};

/// A parsed querystring.
///
/// Holds the raw input, the configuration it was parsed with and the tree
/// of values. Every method takes `&self`: reads share a reader/writer lock
/// and [`set`](Qs::set)/[`add`](Qs::add) take it exclusively, so a `Qs` can
/// be shared between threads. Each call is atomic on its own, but nothing
/// is held across calls.
///
/// Paths are slices of segments: `a[b][c]=1` is found at
/// `&["a", "b", "c"]`. A trailing empty segment is ignored, so `d[]=1` is
/// found at both `&["d"]` and `&["d", ""]`.
///
/// ```
/// use qrystr::Qs;
///
/// let qs = Qs::new("a[b]=123&a[g]=h&a[g]=i&d[]=1.05&j=true").unwrap();
/// assert_eq!(qs.get_int(&["a", "b"]), 123);
/// assert_eq!(qs.get_string_slice(&["a", "g"]), ["h", "i"]);
/// assert_eq!(qs.get_f64(&["d"]), 1.05);
/// assert!(qs.get_bool(&["j"]));
/// assert_eq!(qs.get(&["z"]), None);
/// ```
#[derive(Debug)]
pub struct Qs {
    raw_query: String,
    config: Config,
    root: RwLock<Node>,
}

impl Qs {
    /// Parses a querystring with the default [`Config`].
    ///
    /// Keys and values are percent-decoded and `+` becomes a space before
    /// keys are split on their brackets.
    pub fn new(raw_query: &str) -> Result<Self> {
        Self::with_config(raw_query, Config::default())
    }

    pub fn with_config(raw_query: &str, config: Config) -> Result<Self> {
        let root = parse::parse(raw_query, &config)?;
        Ok(Qs {
            raw_query: raw_query.to_owned(),
            config,
            root: RwLock::new(root),
        })
    }

    /// The string this was parsed from, verbatim.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A copy of the current tree.
    pub fn tree(&self) -> Node {
        self.root.read().clone()
    }

    /// Turns the caller's path into segments, splitting the first element
    /// on the path delimiter if one is configured.
    fn segments<'p, S: AsRef<str>>(&self, path: &'p [S]) -> Vec<&'p str> {
        match (self.config.delimiter(), path.first()) {
            (Some(delimiter), Some(first)) => first.as_ref().split(delimiter).collect(),
            _ => path.iter().map(|segment| segment.as_ref()).collect(),
        }
    }

    /// Replaces the values at `path`, creating the path if needed.
    pub fn set<I, V, S>(&self, values: I, path: &[S])
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
        S: AsRef<str>,
    {
        let path = self.segments(path);
        let values = values.into_iter().map(Into::into).collect();

        let mut root = self.root.write();
        match root.navigate(&path) {
            Some(node) => node.set_values(values),
            None => tracing::trace!("ignoring set on an empty path"),
        }
    }

    /// Appends a value at `path`, creating the path if needed.
    pub fn add<V, S>(&self, value: V, path: &[S])
    where
        V: Into<Value>,
        S: AsRef<str>,
    {
        let path = self.segments(path);
        let value = value.into();

        let mut root = self.root.write();
        match root.navigate(&path) {
            Some(node) => node.push(value),
            None => tracing::trace!("ignoring add on an empty path"),
        }
    }

    /// Returns the first value at `path`.
    ///
    /// `None` if the path does not exist or holds no values; intermediate
    /// nodes like `a` in `a[b]=c` hold none.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<Value> {
        let path = self.segments(path);
        let root = self.root.read();
        root.lookup(&path)
            .and_then(|node| node.values().first().cloned())
    }

    /// Returns every value at `path` in order, or an empty `Vec` if there
    /// are none.
    pub fn get_all<S: AsRef<str>>(&self, path: &[S]) -> Vec<Value> {
        let path = self.segments(path);
        let root = self.root.read();
        root.lookup(&path)
            .map(|node| node.values().to_vec())
            .unwrap_or_default()
    }

    pub fn get_with_default<D, S>(&self, default: D, path: &[S]) -> Value
    where
        D: Into<Value>,
        S: AsRef<str>,
    {
        self.get(path).unwrap_or_else(|| default.into())
    }

    pub fn get_all_with_default<S: AsRef<str>>(&self, default: Vec<Value>, path: &[S]) -> Vec<Value> {
        let values = self.get_all(path);
        if values.is_empty() { default } else { values }
    }

    /// Deserializes the first value at `path` into `T`.
    ///
    /// String values are parsed into the primitive `T` asks for. Returns
    /// `None` if there is no value or it does not fit.
    ///
    /// ```
    /// use qrystr::Qs;
    ///
    /// let qs = Qs::new("page=3&sort=desc").unwrap();
    /// assert_eq!(qs.get_as::<u8, _>(&["page"]), Some(3));
    /// assert_eq!(qs.get_as::<u8, _>(&["sort"]), None);
    /// ```
    pub fn get_as<T: DeserializeOwned, S: AsRef<str>>(&self, path: &[S]) -> Option<T> {
        let value = self.get(path)?;
        T::deserialize(ValueDeserializer::<serde::de::value::Error>::new(value)).ok()
    }

    /// Deserializes every value at `path` into `T`; `None` if any of them
    /// does not fit.
    pub fn get_all_as<T: DeserializeOwned, S: AsRef<str>>(&self, path: &[S]) -> Option<Vec<T>> {
        let values = self.get_all(path);
        let seq = SeqDeserializer::<_, serde::de::value::Error>::new(values.into_iter());
        Vec::<T>::deserialize(seq).ok()
    }

    /// The first value at `path` as a string, or `""`.
    pub fn get_string<S: AsRef<str>>(&self, path: &[S]) -> String {
        self.get(path).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Every value at `path` as a string.
    pub fn get_string_slice<S: AsRef<str>>(&self, path: &[S]) -> Vec<String> {
        self.get_all(path).iter().map(Value::to_string).collect()
    }

    /// The first value at `path` as an `isize`, or 0 if it cannot be
    /// converted.
    pub fn get_int<S: AsRef<str>>(&self, path: &[S]) -> isize {
        isize::try_from(self.get_i64(path)).unwrap_or(0)
    }

    pub fn get_i32<S: AsRef<str>>(&self, path: &[S]) -> i32 {
        self.get(path).map_or(0, |v| v.to_i32())
    }

    pub fn get_i64<S: AsRef<str>>(&self, path: &[S]) -> i64 {
        self.get(path).map_or(0, |v| v.to_i64())
    }

    pub fn get_f32<S: AsRef<str>>(&self, path: &[S]) -> f32 {
        self.get(path).map_or(0.0, |v| v.to_f32())
    }

    pub fn get_f64<S: AsRef<str>>(&self, path: &[S]) -> f64 {
        self.get(path).map_or(0.0, |v| v.to_f64())
    }

    /// The first value at `path` as a `bool`, or `false` if it cannot be
    /// converted.
    pub fn get_bool<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.get(path).is_some_and(|v| v.to_bool())
    }

    /// Serializes the tree with every key and value percent-encoded,
    /// ready to be used in a URL.
    ///
    /// ```
    /// use qrystr::Qs;
    ///
    /// let qs = Qs::new("a[b]=Carrot+City").unwrap();
    /// assert_eq!(qs.to_string(), "a[b]=Carrot City");
    /// assert_eq!(qs.to_encoded_string(), "a%5Bb%5D=Carrot+City");
    /// ```
    pub fn to_encoded_string(&self) -> String {
        let root = self.root.read();
        Serialized::new(&root, true).to_string()
    }

    /// Serializes the tree into a writer. See [`Qs::to_encoded_string`]
    /// and the `Display` impl for the two formats.
    pub fn to_writer<W: Write>(&self, writer: &mut W, encoded: bool) -> Result<()> {
        let root = self.root.read();
        write!(writer, "{}", Serialized::new(&root, encoded))?;
        Ok(())
    }
}

/// One of the two output forms of a tree, ready to be formatted.
struct Serialized<'a> {
    root: &'a Node,
    encoded: bool,
}

impl<'a> Serialized<'a> {
    fn new(root: &'a Node, encoded: bool) -> Self {
        Serialized { root, encoded }
    }
}

impl fmt::Display for Serialized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ser::write_tree(f, self.root, self.encoded)
    }
}

/// Serializes the tree without encoding, e.g. `a[b]=c&a[g]=h`.
///
/// Siblings come out sorted by segment (or in creation order with the
/// `indexmap` feature), not necessarily in input order.
impl fmt::Display for Qs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Serialized::new(&self.root.read(), false), f)
    }
}

impl FromStr for Qs {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Qs::new(s)
    }
}

impl Clone for Qs {
    fn clone(&self) -> Self {
        Qs {
            raw_query: self.raw_query.clone(),
            config: self.config.clone(),
            root: RwLock::new(self.tree()),
        }
    }
}
