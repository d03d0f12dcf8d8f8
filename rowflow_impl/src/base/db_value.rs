use crate::DeserializationError;
use serde::de::value::SeqDeserializer;
use serde::de::{Deserializer, Visitor};

/// Enum for all supported field value types.
///
/// A [`RowBuffer`](crate::RowBuffer) is a sequence of `DbValue`s.
/// `DbValue::NULL` is the database's "no value" sentinel; it is also the neutral
/// value that pooled buffers are reset to.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DbValue {
    /// Representation of a database NULL value.
    #[default]
    NULL,
    /// Stores a boolean value.
    BOOLEAN(bool),
    /// Stores an 8-bit unsigned integer.
    TINYINT(u8),
    /// Stores a 16-bit signed integer.
    SMALLINT(i16),
    /// Stores a 32-bit signed integer.
    INT(i32),
    /// Stores a 64-bit signed integer.
    BIGINT(i64),
    /// Stores a single-precision 32-bit floating-point number.
    REAL(f32),
    /// Stores a double-precision 64-bit floating-point number.
    DOUBLE(f64),
    /// Stores a character string.
    STRING(String),
    /// Stores binary data.
    BINARY(Vec<u8>),
}

impl DbValue {
    /// Returns true if the value is the NULL sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::NULL)
    }

    /// Returns the name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::NULL => "NULL",
            Self::BOOLEAN(_) => "BOOLEAN",
            Self::TINYINT(_) => "TINYINT",
            Self::SMALLINT(_) => "SMALLINT",
            Self::INT(_) => "INT",
            Self::BIGINT(_) => "BIGINT",
            Self::REAL(_) => "REAL",
            Self::DOUBLE(_) => "DOUBLE",
            Self::STRING(_) => "STRING",
            Self::BINARY(_) => "BINARY",
        }
    }

    /// Returns the contained string, if this is a `STRING`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::STRING(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as i64, if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::TINYINT(v) => Some(i64::from(v)),
            Self::SMALLINT(v) => Some(i64::from(v)),
            Self::INT(v) => Some(i64::from(v)),
            Self::BIGINT(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for DbValue {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NULL => write!(fmt, "<NULL>"),
            Self::BOOLEAN(v) => write!(fmt, "{v}"),
            Self::TINYINT(v) => write!(fmt, "{v}"),
            Self::SMALLINT(v) => write!(fmt, "{v}"),
            Self::INT(v) => write!(fmt, "{v}"),
            Self::BIGINT(v) => write!(fmt, "{v}"),
            Self::REAL(v) => write!(fmt, "{v}"),
            Self::DOUBLE(v) => write!(fmt, "{v}"),
            Self::STRING(v) => write!(fmt, "{v}"),
            Self::BINARY(v) => write!(fmt, "<BINARY length = {}>", v.len()),
        }
    }
}

macro_rules! impl_from {
    ($t:ty, $variant:ident) => {
        impl From<$t> for DbValue {
            fn from(v: $t) -> Self {
                Self::$variant(v)
            }
        }
    };
}
impl_from!(bool, BOOLEAN);
impl_from!(u8, TINYINT);
impl_from!(i16, SMALLINT);
impl_from!(i32, INT);
impl_from!(i64, BIGINT);
impl_from!(f32, REAL);
impl_from!(f64, DOUBLE);
impl_from!(String, STRING);
impl_from!(Vec<u8>, BINARY);

impl From<&str> for DbValue {
    fn from(s: &str) -> Self {
        Self::STRING(s.to_string())
    }
}

impl<T: Into<DbValue>> From<Option<T>> for DbValue {
    fn from(o: Option<T>) -> Self {
        o.map_or(Self::NULL, Into::into)
    }
}

// Gives serde read access to a single value.
//
// NULL is offered as `none` to option targets, and as `unit` to all others,
// which lets non-optional targets fail with a type mismatch.
// BINARY is offered as a sequence of bytes to sequence targets like `Vec<u8>`.
pub(crate) struct DbValueDeserializer<'a> {
    value: &'a DbValue,
}
impl<'a> DbValueDeserializer<'a> {
    pub(crate) fn new(value: &'a DbValue) -> Self {
        Self { value }
    }
}

impl<'de, 'a> Deserializer<'de> for DbValueDeserializer<'a> {
    type Error = DeserializationError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match *self.value {
            DbValue::NULL => visitor.visit_unit(),
            DbValue::BOOLEAN(v) => visitor.visit_bool(v),
            DbValue::TINYINT(v) => visitor.visit_u8(v),
            DbValue::SMALLINT(v) => visitor.visit_i16(v),
            DbValue::INT(v) => visitor.visit_i32(v),
            DbValue::BIGINT(v) => visitor.visit_i64(v),
            DbValue::REAL(v) => visitor.visit_f32(v),
            DbValue::DOUBLE(v) => visitor.visit_f64(v),
            DbValue::STRING(ref s) => visitor.visit_str(s),
            DbValue::BINARY(ref b) => visitor.visit_bytes(b),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        if self.value.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match *self.value {
            DbValue::BINARY(ref b) => {
                let mut seq: SeqDeserializer<_, DeserializationError> =
                    SeqDeserializer::new(b.iter().copied());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match *self.value {
            DbValue::BINARY(ref b) => visitor.visit_byte_buf(b.clone()),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes unit unit_struct tuple
        tuple_struct map struct enum identifier ignored_any
    }
}
