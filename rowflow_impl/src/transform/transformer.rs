use super::{property_cache::properties_of, row_deserializer::RowDeserializer};
use crate::base::fold;
use crate::{usage_err, ColumnPlan, DbValue, DeserializationError, RfError, RfResult};
use serde::de::DeserializeOwned;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

lazy_static! {
    static ref SHARED_TRANSFORMERS: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>> =
        RwLock::new(HashMap::new());
}

/// Maps rows onto instances of a target type `T`.
///
/// The properties of `T` are the field names its `serde::Deserialize` implementation
/// expects (i.e. after applying `#[serde(rename)]`). They are determined once per type
/// and cached process-wide.
///
/// By default, each property is read from the column with the same name (ignoring case).
/// Overrides can map a property to a differently named column, or exclude it.
///
/// A property for which the result has no column keeps its default value, which
/// requires that it is an `Option` or is annotated with `#[serde(default)]`.
pub struct Transformer<T> {
    type_name: &'static str,
    properties: &'static [&'static str],
    // property and column, in declaration order; excluded properties are missing
    column_map: Vec<(&'static str, String)>,
    // folded column name to property; each column is read by at most one property
    column_index: HashMap<String, &'static str>,
    _target: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Transformer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer")
            .field("type_name", &self.type_name)
            .field("column_map", &self.column_map)
            .finish()
    }
}

impl<T> Transformer<T>
where
    T: DeserializeOwned + 'static,
{
    /// Creates a transformer that maps each property to the column of the same name.
    ///
    /// # Errors
    ///
    /// `RfError::Deserialization` if `T` is not a struct with named fields.
    pub fn new() -> RfResult<Self> {
        Self::with_overrides(std::iter::empty::<(&str, Option<String>)>())
    }

    /// Creates a transformer with individual property-to-column overrides.
    ///
    /// Each override names a property and either the column it is read from,
    /// or `None` to exclude the property from mapping.
    ///
    /// # Errors
    ///
    /// `RfError::Deserialization` if `T` is not a struct with named fields.
    ///
    /// `RfError::ArgumentInvalidDetailed` if an override names an unknown property,
    /// maps a property to a blank column name, or lets two properties read the
    /// same column.
    pub fn with_overrides<I, P, C>(overrides: I) -> RfResult<Self>
    where
        I: IntoIterator<Item = (P, Option<C>)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let type_name = std::any::type_name::<T>();
        let properties = properties_of::<T>()?;

        let mut overridden: HashMap<&'static str, Option<String>> = HashMap::new();
        for (property, column) in overrides {
            let property = property.as_ref();
            let known = properties
                .iter()
                .copied()
                .find(|p| fold(p) == fold(property))
                .ok_or_else(|| {
                    RfError::ArgumentInvalidDetailed(format!(
                        "{type_name} has no property `{property}`"
                    ))
                })?;
            let column: Option<String> = column.map(Into::into);
            if matches!(column, Some(ref c) if c.trim().is_empty()) {
                return Err(RfError::ArgumentInvalidDetailed(format!(
                    "blank column name for property `{property}`"
                )));
            }
            overridden.insert(known, column);
        }

        let column_map: Vec<(&'static str, String)> = properties
            .iter()
            .filter_map(|&property| match overridden.remove(property) {
                Some(Some(column)) => Some((property, column)),
                Some(None) => None,
                None => Some((property, property.to_string())),
            })
            .collect();

        let mut column_index = HashMap::with_capacity(column_map.len());
        for (property, column) in &column_map {
            if let Some(other) = column_index.insert(fold(column), *property) {
                return Err(RfError::ArgumentInvalidDetailed(format!(
                    "properties `{other}` and `{property}` of {type_name} are both read from column `{column}`"
                )));
            }
        }

        debug!(
            "Transformer::with_overrides(): {type_name} maps {} of {} properties",
            column_map.len(),
            properties.len()
        );
        Ok(Self {
            type_name,
            properties,
            column_map,
            column_index,
            _target: PhantomData,
        })
    }

    /// Returns the process-wide transformer of `T` without overrides,
    /// creating it on first use.
    ///
    /// # Errors
    ///
    /// `RfError::Deserialization` if `T` is not a struct with named fields.
    pub fn shared() -> RfResult<Arc<Self>>
    where
        T: Send + Sync,
    {
        let type_id = TypeId::of::<T>();
        let cached = SHARED_TRANSFORMERS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        let any = match cached {
            Some(any) => any,
            None => {
                let fresh: Arc<dyn Any + Send + Sync> = Arc::new(Self::new()?);
                Arc::clone(
                    SHARED_TRANSFORMERS
                        .write()
                        .unwrap_or_else(PoisonError::into_inner)
                        .entry(type_id)
                        .or_insert(fresh),
                )
            }
        };
        any.downcast::<Self>()
            .map_err(|_| RfError::Impl("transformer cache holds a foreign type"))
    }

    /// All properties of the target type, in declaration order.
    pub fn properties(&self) -> &'static [&'static str] {
        self.properties
    }

    /// The names of the columns that are read, in property declaration order.
    ///
    /// Use these to resolve a [`ColumnPlan`] that reads only what the mapping needs.
    pub fn column_names(&self) -> Vec<&str> {
        self.column_map.iter().map(|(_, c)| c.as_str()).collect()
    }

    /// The column a property is read from, or `None` if the property is excluded.
    pub fn column_of(&self, property: &str) -> Option<&str> {
        self.column_map
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, c)| c.as_str())
    }

    /// Binds the transformer to a concrete column plan.
    ///
    /// Each planned column is matched (ignoring case) with the property that reads it;
    /// absent columns, and columns that no property reads, are skipped.
    pub fn processor(&self, plan: &ColumnPlan) -> Processor<T> {
        let mut used = Vec::<&'static str>::with_capacity(plan.len());
        let setters = plan
            .iter()
            .map(|column| {
                if column.is_absent() {
                    return None;
                }
                let property = *self.column_index.get(&fold(column.name()))?;
                if used.contains(&property) {
                    None
                } else {
                    used.push(property);
                    Some(property)
                }
            })
            .collect::<Vec<_>>();
        trace!(
            "Transformer::processor(): {} of {} columns are mapped onto {}",
            used.len(),
            plan.len(),
            self.type_name
        );
        Processor {
            type_name: self.type_name,
            setters,
            _target: PhantomData,
        }
    }
}

/// A [`Transformer`] bound to a concrete column plan; converts row buffers into `T`.
///
/// A processor belongs to a single read and does not keep any buffer beyond
/// a call of `transform()`.
pub struct Processor<T> {
    type_name: &'static str,
    setters: Vec<Option<&'static str>>,
    _target: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Processor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("type_name", &self.type_name)
            .field("setters", &self.setters)
            .finish()
    }
}

impl<T: DeserializeOwned> Processor<T> {
    /// Number of row slots the processor expects.
    pub fn width(&self) -> usize {
        self.setters.len()
    }

    /// The property each row slot is assigned to, if any.
    pub fn setters(&self) -> &[Option<&'static str>] {
        &self.setters
    }

    /// Creates a new instance of `T` from the values of a row buffer.
    ///
    /// NULL values become `None` for optional properties.
    ///
    /// # Errors
    ///
    /// `RfError::InvalidMapping` if a property rejects its value, or if a property
    /// without default has no value; the partially read instance is discarded.
    pub fn transform(&self, row: &[DbValue]) -> RfResult<T> {
        if row.len() != self.setters.len() {
            return Err(usage_err!(
                "row has {} values, but the processor for {} expects {}",
                row.len(),
                self.type_name,
                self.setters.len()
            ));
        }
        T::deserialize(RowDeserializer::new(&self.setters, row)).map_err(|e| match e {
            DeserializationError::Property { property, source } => RfError::InvalidMapping {
                property: property.to_string(),
                source: *source,
            },
            DeserializationError::MissingField(property) => RfError::InvalidMapping {
                property: property.to_string(),
                source: DeserializationError::MissingField(property),
            },
            e => RfError::Deserialization { source: e },
        })
    }
}
