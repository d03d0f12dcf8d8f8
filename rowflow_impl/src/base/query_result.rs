use crate::ColumnPlan;

/// Pairs the resolved column names and ordinals of a read with its result container,
/// e.g. a lazy row sequence or a fully materialized queue of rows.
///
/// `names()` and `ordinals()` always have the same length; an ordinal is `None`
/// for a requested column that is not part of the result.
#[derive(Debug)]
pub struct QueryResult<R> {
    names: Vec<String>,
    ordinals: Vec<Option<usize>>,
    result: R,
}

impl<R> QueryResult<R> {
    pub(crate) fn new(plan: &ColumnPlan, result: R) -> Self {
        Self {
            names: plan.names(),
            ordinals: plan.ordinals(),
            result,
        }
    }

    /// The requested column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The resolved ordinals of the requested columns.
    pub fn ordinals(&self) -> &[Option<usize>] {
        &self.ordinals
    }

    /// Access to the result container.
    pub fn result(&self) -> &R {
        &self.result
    }

    /// Mutable access to the result container.
    pub fn result_mut(&mut self) -> &mut R {
        &mut self.result
    }

    /// Consumes the wrapper and returns the result container.
    pub fn into_result(self) -> R {
        self.result
    }

    /// Replaces the result container, keeping names and ordinals.
    pub fn map<S, F: FnOnce(R) -> S>(self, f: F) -> QueryResult<S> {
        QueryResult {
            names: self.names,
            ordinals: self.ordinals,
            result: f(self.result),
        }
    }
}
