use std::{fmt, marker::PhantomData};

use serde::de::{self, IntoDeserializer, value::StringDeserializer};

use super::Value;

/// A deserializer over a single [`Value`].
///
/// Strings are parsed into whatever primitive the target type asks for,
/// so `Value::String("42")` deserializes into a `u8`. When parsing fails
/// the string is handed over as-is and the visitor decides.
pub struct ValueDeserializer<E> {
    value: Value,
    marker: PhantomData<E>,
}

impl<E> ValueDeserializer<E> {
    pub fn new(value: Value) -> Self {
        ValueDeserializer {
            value,
            marker: PhantomData,
        }
    }
}

impl<E> Clone for ValueDeserializer<E> {
    fn clone(&self) -> Self {
        ValueDeserializer::new(self.value.clone())
    }
}

impl<E> fmt::Debug for ValueDeserializer<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("ValueDeserializer")
            .field("value", &self.value)
            .finish()
    }
}

macro_rules! deserialize_primitive {
    ($ty:ident, $method:ident, $visit_method:ident) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value, Self::Error>
        where
            V: de::Visitor<'de>,
        {
            if let Value::String(s) = &self.value {
                if let Ok(val) = s.parse::<$ty>() {
                    return visitor.$visit_method(val);
                }
            }
            self.deserialize_any(visitor)
        }
    };
}

impl<'de, E> de::Deserializer<'de> for ValueDeserializer<E>
where
    E: de::Error,
{
    type Error = E;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_string(s),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Null => visitor.visit_unit(),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => {
                let variant: StringDeserializer<E> = s.into_deserializer();
                visitor.visit_enum(variant)
            }
            other => ValueDeserializer::<E>::new(other).deserialize_any(visitor),
        }
    }

    deserialize_primitive!(bool, deserialize_bool, visit_bool);
    deserialize_primitive!(i8, deserialize_i8, visit_i8);
    deserialize_primitive!(i16, deserialize_i16, visit_i16);
    deserialize_primitive!(i32, deserialize_i32, visit_i32);
    deserialize_primitive!(i64, deserialize_i64, visit_i64);
    deserialize_primitive!(u8, deserialize_u8, visit_u8);
    deserialize_primitive!(u16, deserialize_u16, visit_u16);
    deserialize_primitive!(u32, deserialize_u32, visit_u32);
    deserialize_primitive!(u64, deserialize_u64, visit_u64);
    deserialize_primitive!(f32, deserialize_f32, visit_f32);
    deserialize_primitive!(f64, deserialize_f64, visit_f64);

    serde::forward_to_deserialize_any! {
        char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod test {
    use serde::Deserialize;
    use serde::de::value::Error;

    use super::ValueDeserializer;
    use crate::Value;

    fn from_value<'de, T: Deserialize<'de>>(value: Value) -> Result<T, Error> {
        T::deserialize(ValueDeserializer::<Error>::new(value))
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Color {
        Red,
        Blue,
    }

    #[test]
    fn parses_strings_into_primitives() {
        assert_eq!(from_value::<u8>("42".into()).unwrap(), 42);
        assert_eq!(from_value::<f64>("1.05".into()).unwrap(), 1.05);
        assert!(from_value::<bool>("true".into()).unwrap());
        assert_eq!(from_value::<String>("h".into()).unwrap(), "h");
    }

    #[test]
    fn typed_values_pass_through() {
        assert_eq!(from_value::<i64>(Value::Int(-3)).unwrap(), -3);
        assert_eq!(from_value::<u8>(Value::Int(200)).unwrap(), 200);
        assert!(from_value::<bool>(Value::Bool(true)).unwrap());
    }

    #[test]
    fn mismatches_are_errors() {
        assert!(from_value::<u8>("300".into()).is_err());
        assert!(from_value::<i32>("1.05".into()).is_err());
        assert!(from_value::<bool>(Value::Int(1)).is_err());
    }

    #[test]
    fn options_and_enums() {
        assert_eq!(from_value::<Option<u8>>(Value::Null).unwrap(), None);
        assert_eq!(from_value::<Option<u8>>("7".into()).unwrap(), Some(7));
        assert_eq!(from_value::<Color>("blue".into()).unwrap(), Color::Blue);
        assert_eq!(from_value::<Color>("red".into()).unwrap(), Color::Red);
        assert!(from_value::<Color>("green".into()).is_err());
    }
}
