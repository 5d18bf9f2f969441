//! The map type used for the children of a [`Node`](crate::Node).
//!
//! Children are kept sorted by segment by default, which makes
//! serialization deterministic. With the `indexmap` feature they keep the
//! order in which they were first created instead.

#[cfg(feature = "indexmap")]
pub type Map<K, V> = indexmap::IndexMap<K, V>;

#[cfg(not(feature = "indexmap"))]
pub type Map<K, V> = std::collections::BTreeMap<K, V>;
