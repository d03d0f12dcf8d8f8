use crate::{RfError, RfResult, RowSchema};

/// One entry of a [`ColumnPlan`]: a requested column name and its resolved ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedColumn {
    name: String,
    ordinal: Option<usize>,
}

impl PlannedColumn {
    /// The column name as it was requested.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordinal in the cursor, or `None` if the column is absent.
    pub fn ordinal(&self) -> Option<usize> {
        self.ordinal
    }

    /// Returns true if the column has no match in the cursor.
    pub fn is_absent(&self) -> bool {
        self.ordinal.is_none()
    }
}

/// The ordered list of columns that is read from a cursor, computed once per cursor.
///
/// The position of an entry in the plan is the position of its value in a
/// [`RowBuffer`](crate::RowBuffer), which is not necessarily the column's
/// ordinal in the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    columns: Vec<PlannedColumn>,
}

impl ColumnPlan {
    /// Resolves the requested column names against the schema, ignoring case.
    ///
    /// # Errors
    ///
    /// `RfError::ArgumentInvalid` if no column or a blank column name is requested.
    ///
    /// `RfError::SchemaMismatch` if a requested column is not part of the schema
    /// and `ignore_missing` is false.
    pub fn resolve<S: AsRef<str>>(
        requested: &[S],
        schema: &RowSchema,
        ignore_missing: bool,
    ) -> RfResult<Self> {
        if requested.is_empty() {
            return Err(RfError::ArgumentInvalid("no columns requested"));
        }
        let columns = requested
            .iter()
            .map(|name| {
                let name = name.as_ref();
                if name.trim().is_empty() {
                    return Err(RfError::ArgumentInvalid("blank column name requested"));
                }
                let ordinal = schema.ordinal_of(name);
                if ordinal.is_none() && !ignore_missing {
                    return Err(RfError::SchemaMismatch {
                        column: name.to_string(),
                    });
                }
                Ok(PlannedColumn {
                    name: name.to_string(),
                    ordinal,
                })
            })
            .collect::<RfResult<Vec<PlannedColumn>>>()?;

        debug!(
            "ColumnPlan::resolve(): {} of {} requested columns found",
            columns.iter().filter(|c| !c.is_absent()).count(),
            columns.len()
        );
        Ok(Self { columns })
    }

    /// A plan that reads all columns of the schema, in cursor order.
    pub fn all(schema: &RowSchema) -> Self {
        Self {
            columns: schema
                .names()
                .iter()
                .enumerate()
                .map(|(ordinal, name)| PlannedColumn {
                    name: name.clone(),
                    ordinal: Some(ordinal),
                })
                .collect(),
        }
    }

    // reads no column at all; for mappings whose properties are all excluded
    pub(crate) fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Number of planned columns, which is the width of the row buffers.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the plan has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates over the planned columns.
    pub fn iter(&self) -> std::slice::Iter<'_, PlannedColumn> {
        self.columns.iter()
    }

    /// The requested names, in plan order.
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// The resolved ordinals, in plan order.
    pub fn ordinals(&self) -> Vec<Option<usize>> {
        self.columns.iter().map(|c| c.ordinal).collect()
    }

    // true if the plan reads columns 0..n of a cursor with n columns, in order
    pub(crate) fn is_identity(&self, field_count: usize) -> bool {
        self.columns.len() == field_count
            && self
                .columns
                .iter()
                .enumerate()
                .all(|(i, c)| c.ordinal == Some(i))
    }
}

impl<'a> IntoIterator for &'a ColumnPlan {
    type Item = &'a PlannedColumn;
    type IntoIter = std::slice::Iter<'a, PlannedColumn>;
    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod test {
    use super::ColumnPlan;
    use crate::{RfError, RowSchema};

    fn schema() -> RowSchema {
        RowSchema::new(vec!["A".to_string(), "B".to_string()])
    }

    #[test]
    fn test_resolve() {
        let plan = ColumnPlan::resolve(&["b", "a"], &schema(), false).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.ordinals(), vec![Some(1), Some(0)]);
        assert_eq!(plan.names(), vec!["b".to_string(), "a".to_string()]);
        assert!(!plan.is_identity(2));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let first = ColumnPlan::resolve(&["A", "c"], &schema(), true).unwrap();
        let second = ColumnPlan::resolve(&["A", "c"], &schema(), true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_column_tolerance() {
        let plan = ColumnPlan::resolve(&["A", "C"], &schema(), true).unwrap();
        assert_eq!(plan.ordinals(), vec![Some(0), None]);
        assert!(plan.iter().nth(1).unwrap().is_absent());

        match ColumnPlan::resolve(&["A", "C"], &schema(), false) {
            Err(RfError::SchemaMismatch { column }) => assert_eq!(column, "C"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_requests() {
        let none: [&str; 0] = [];
        assert!(matches!(
            ColumnPlan::resolve(&none, &schema(), true),
            Err(RfError::ArgumentInvalid(_))
        ));
        assert!(matches!(
            ColumnPlan::resolve(&["A", " "], &schema(), true),
            Err(RfError::ArgumentInvalid(_))
        ));
    }

    #[test]
    fn test_all() {
        let plan = ColumnPlan::all(&schema());
        assert!(plan.is_identity(2));
        assert_eq!(plan.names(), vec!["A".to_string(), "B".to_string()]);
    }
}
