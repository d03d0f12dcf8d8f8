use crate::DeserializationError;
use serde::de::{DeserializeOwned, Deserializer, Visitor};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

lazy_static! {
    static ref PROPERTY_CACHE: RwLock<HashMap<TypeId, &'static [&'static str]>> =
        RwLock::new(HashMap::new());
}

// Returns the (serde) field names of the target type.
//
// They are determined once per type, by letting the type's `Deserialize`
// implementation announce its fields to a probing deserializer, and then cached.
pub(crate) fn properties_of<T>() -> Result<&'static [&'static str], DeserializationError>
where
    T: DeserializeOwned + 'static,
{
    let type_id = TypeId::of::<T>();
    if let Some(properties) = PROPERTY_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
        .copied()
    {
        return Ok(properties);
    }

    let properties = probe::<T>()?;
    trace!(
        "properties_of(): caching {} properties of {}",
        properties.len(),
        std::any::type_name::<T>()
    );
    Ok(*PROPERTY_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(type_id)
        .or_insert(properties))
}

fn probe<T: DeserializeOwned>() -> Result<&'static [&'static str], DeserializationError> {
    let mut fields = None;
    // the probe always fails, after having recorded the fields
    let _ = T::deserialize(FieldProbe {
        fields: &mut fields,
    });
    fields.ok_or(DeserializationError::NotAStruct)
}

struct FieldProbe<'a> {
    fields: &'a mut Option<&'static [&'static str]>,
}

impl<'de, 'a> Deserializer<'de> for FieldProbe<'a> {
    type Error = DeserializationError;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        Err(DeserializationError::NotAStruct)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        *self.fields = Some(fields);
        Err(DeserializationError::NotAStruct)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

#[cfg(test)]
mod test {
    use super::properties_of;
    use serde::Deserialize;

    #[allow(dead_code)]
    #[derive(Deserialize)]
    struct Item {
        id: i64,
        #[serde(rename = "Label")]
        label: Option<String>,
    }

    #[test]
    fn test_properties() {
        let first = properties_of::<Item>().unwrap();
        assert_eq!(first, &["id", "Label"]);
        // cache hit returns the very same slice
        let second = properties_of::<Item>().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_not_a_struct() {
        assert!(properties_of::<i32>().is_err());
        assert!(properties_of::<std::collections::HashMap<String, i32>>().is_err());
    }
}
