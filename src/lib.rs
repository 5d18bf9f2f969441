//! Nested querystrings as a navigable tree of values.
//!
//! Querystrings are not formally defined and loosely take the form of
//! _nested_ urlencoded queries, where bracketed keys such as `a[b][c]`
//! describe a path into a tree. This library parses such a string once
//! into a [`Qs`], which can then be read, changed and written back out.
//!
//! For users who only need to deserialize into a known struct, the
//! `serde_qs` crate is likely a better fit. `qrystr` is for the cases where
//! the shape of the query is not known up front.
//!
//! ## Keys
//!
//! A key is split into segments on its brackets: `a[b][c]` becomes
//! `["a", "b", "c"]` and `d[]` becomes `["d", ""]`, which addresses the
//! same node as `["d"]`. A `[` inside brackets or a `]` outside of them is
//! an error. From bracket group number [`Config::max_depth`] on, the rest
//! of the key is kept as one segment, brackets and all. See [`parse_key`].
//!
//! ## Values
//!
//! Parsed values are always strings, kept in input order. Callers can
//! store other scalars (see [`Value`]) with [`Qs::set`] and [`Qs::add`].
//! Reads never fail: a missing value is `None` or an empty `Vec`, and the
//! typed accessors fall back to zero values.
//!
//! ## Usage
//!
//! ```
//! use qrystr::{Config, Qs, Value};
//!
//! let qs = Qs::new("a[b]=123&a[g]=h&a[g]=i&d[]=1.05&j=true").unwrap();
//! assert_eq!(qs.get(&["a", "b"]), Some(Value::from("123")));
//! assert_eq!(qs.get_all(&["a", "g"]), [Value::from("h"), Value::from("i")]);
//! assert_eq!(qs.get(&["a"]), None);
//!
//! qs.add("x", &["a", "b"]);
//! qs.set([1, 2], &["n"]);
//! assert_eq!(qs.get_all(&["a", "b"]).len(), 2);
//! assert_eq!(qs.get_i64(&["n"]), 1);
//!
//! // paths can be written as one string with a delimiter
//! let qs = Config::new().path_delimiter(".").parse("a[b]=c").unwrap();
//! assert_eq!(qs.get_string(&["a.b"]), "c");
//! ```

mod config;
mod error;
mod map;
mod parse;
mod qs;
mod ser;
mod tree;
mod value;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use parse::parse_key;
#[doc(inline)]
pub use qs::Qs;
#[doc(inline)]
pub use tree::Node;
#[doc(inline)]
pub use value::{Value, ValueDeserializer};
