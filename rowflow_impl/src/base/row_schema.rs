use crate::{RfResult, RowCursor};
use std::collections::HashMap;

/// The column names that a cursor reports, captured once per cursor.
///
/// Name lookups ignore case; if a name occurs more than once,
/// the first occurrence wins.
#[derive(Debug, Clone)]
pub struct RowSchema {
    names: Vec<String>,
    name_to_ordinal: HashMap<String, usize>,
}

impl RowSchema {
    /// Creates a schema from a list of column names.
    pub fn new(names: Vec<String>) -> Self {
        let mut name_to_ordinal = HashMap::with_capacity(names.len());
        for (ordinal, name) in names.iter().enumerate() {
            name_to_ordinal.entry(fold(name)).or_insert(ordinal);
        }
        Self {
            names,
            name_to_ordinal,
        }
    }

    /// Reads the column names from the cursor.
    pub fn from_cursor<C: RowCursor + ?Sized>(cursor: &C) -> RfResult<Self> {
        let names = (0..cursor.field_count())
            .map(|ordinal| cursor.field_name(ordinal))
            .collect::<RfResult<Vec<String>>>()?;
        Ok(Self::new(names))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Ordinal of the column with the given name, ignoring case.
    pub fn ordinal_of(&self, name: &str) -> Option<usize> {
        self.name_to_ordinal.get(&fold(name)).copied()
    }

    /// Name of the column at the given ordinal.
    pub fn name_at(&self, ordinal: usize) -> Option<&str> {
        self.names.get(ordinal).map(String::as_str)
    }

    /// All column names, in cursor order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

pub(crate) fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod test {
    use super::RowSchema;

    #[test]
    fn test_lookup_ignores_case() {
        let schema = RowSchema::new(vec!["Id".to_string(), "NAME".to_string()]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.ordinal_of("id"), Some(0));
        assert_eq!(schema.ordinal_of("Name"), Some(1));
        assert_eq!(schema.ordinal_of("age"), None);
        assert_eq!(schema.name_at(1), Some("NAME"));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let schema = RowSchema::new(vec!["a".to_string(), "b".to_string(), "A".to_string()]);
        assert_eq!(schema.ordinal_of("a"), Some(0));
        assert_eq!(schema.ordinal_of("A"), Some(0));
    }
}
