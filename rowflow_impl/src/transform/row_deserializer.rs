use crate::base::DbValueDeserializer;
use crate::{DbValue, DeserializationError};
use serde::de::value::StrDeserializer;
use serde::de::{DeserializeSeed, Deserializer, IntoDeserializer, MapAccess, Visitor};

// Presents a row buffer to serde as a map from property names to values.
//
// `setters[i]` is the property that receives `values[i]`;
// slots without property are skipped.
pub(crate) struct RowDeserializer<'a> {
    setters: &'a [Option<&'static str>],
    values: &'a [DbValue],
}

impl<'a> RowDeserializer<'a> {
    pub(crate) fn new(setters: &'a [Option<&'static str>], values: &'a [DbValue]) -> Self {
        Self { setters, values }
    }
}

impl<'de, 'a> Deserializer<'de> for RowDeserializer<'a> {
    type Error = DeserializationError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(RowMapAccess {
            slots: self.setters.iter().zip(self.values.iter()),
            pending: None,
        })
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct RowMapAccess<'a> {
    slots: std::iter::Zip<std::slice::Iter<'a, Option<&'static str>>, std::slice::Iter<'a, DbValue>>,
    pending: Option<(&'static str, &'a DbValue)>,
}

impl<'de, 'a> MapAccess<'de> for RowMapAccess<'a> {
    type Error = DeserializationError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        for (setter, value) in self.slots.by_ref() {
            if let Some(property) = *setter {
                self.pending = Some((property, value));
                let key: StrDeserializer<'_, DeserializationError> = property.into_deserializer();
                return seed.deserialize(key).map(Some);
            }
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        let (property, value) = self
            .pending
            .take()
            .ok_or_else(|| DeserializationError::Conversion("value requested before key".to_string()))?;
        seed.deserialize(DbValueDeserializer::new(value))
            .map_err(|e| DeserializationError::Property {
                property,
                source: Box::new(e),
            })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.slots.len())
    }
}
