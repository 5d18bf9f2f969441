use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IntoDeserializer, Visitor};
use serde::ser::{Serialize, Serializer};

mod deserializer;

pub use self::deserializer::ValueDeserializer;

/// A scalar stored in the tree.
///
/// Everything parsed from a querystring starts out as a `String`; the
/// other variants only appear once a caller stores them via
/// [`Qs::set`](crate::Qs::set) or [`Qs::add`](crate::Qs::add).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Best-effort conversion to an integer.
    ///
    /// Strings must hold an integer, optionally followed by an all-zero
    /// fraction (`"12.00"`). Floats are truncated and booleans map to 1
    /// and 0. Anything else yields 0.
    pub fn to_i64(&self) -> i64 {
        match self {
            Value::String(s) => parse_int(s).unwrap_or(0),
            Value::Int(i) => *i,
            Value::Float(f) => *f as i64,
            Value::Bool(b) => i64::from(*b),
            Value::Null => 0,
        }
    }

    /// Like [`Value::to_i64`], but out-of-range values yield 0.
    pub fn to_i32(&self) -> i32 {
        i32::try_from(self.to_i64()).unwrap_or(0)
    }

    /// Best-effort conversion to a float. Unparseable strings and `Null`
    /// yield 0.0.
    pub fn to_f64(&self) -> f64 {
        match self {
            Value::String(s) => s.parse().unwrap_or(0.0),
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Null => 0.0,
        }
    }

    /// Like [`Value::to_f64`], but finite values outside the `f32` range
    /// yield 0.0.
    pub fn to_f32(&self) -> f32 {
        let f = self.to_f64();
        if f.is_finite() && f.abs() > f64::from(f32::MAX) {
            0.0
        } else {
            f as f32
        }
    }

    /// Best-effort conversion to a boolean.
    ///
    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False` for
    /// strings; numbers are true when non-zero.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::String(s) => matches!(s.as_str(), "1" | "t" | "T" | "TRUE" | "true" | "True"),
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Null => false,
        }
    }
}

/// Drops an all-zero fraction, so `"12.00"` reads as `"12"` but `"12."`
/// is left alone.
fn trim_zero_fraction(s: &str) -> &str {
    match s.rsplit_once('.') {
        Some((int, fraction))
            if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') =>
        {
            int
        }
        _ => s,
    }
}

/// Reads integer text the way Go literals are written: an optional sign,
/// then `0x`, `0o`, `0b` or a bare leading `0` (octal) to pick the base,
/// with `_` allowed between digits.
fn parse_int(s: &str) -> Option<i64> {
    let s = trim_zero_fraction(s);
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits, prefixed) = match body.get(..2) {
        Some("0x" | "0X") => (16, &body[2..], true),
        Some("0o" | "0O") => (8, &body[2..], true),
        Some("0b" | "0B") => (2, &body[2..], true),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..], true),
        _ => (10, body, false),
    };

    if digits.contains('_') {
        let misplaced = digits.ends_with('_')
            || digits.contains("__")
            || (!prefixed && digits.starts_with('_'));
        if misplaced {
            return None;
        }
    }

    let digits = digits.replace('_', "");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let magnitude = i128::from(u64::from_str_radix(&digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Renders the value the way it is written into a querystring; `Null`
/// renders as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => f.write_str(itoa::Buffer::new().format(*i)),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_none(),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number, boolean or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de, E> IntoDeserializer<'de, E> for Value
where
    E: de::Error,
{
    type Deserializer = ValueDeserializer<E>;

    fn into_deserializer(self) -> Self::Deserializer {
        ValueDeserializer::new(self)
    }
}
