use crate::{DbValue, RfResult};

/// A forward-only, single-pass handle over the rows that a database command returned.
///
/// Implement this trait to connect the row readers of this crate to a concrete
/// database client. After `read_next()` returned `true`, the values of the current
/// row are accessible with `value()` and `values()`.
///
/// A cursor must only be driven by a single caller at a time.
pub trait RowCursor {
    /// Number of columns of the result.
    fn field_count(&self) -> usize;

    /// Name of the column at the given ordinal.
    fn field_name(&self, ordinal: usize) -> RfResult<String>;

    /// Advances to the next row; returns `false` if the cursor is exhausted.
    fn read_next(&mut self) -> RfResult<bool>;

    /// Value of the given column in the current row.
    fn value(&self, ordinal: usize) -> RfResult<DbValue>;

    /// Copies the values of the current row into `buffer`, starting with ordinal 0,
    /// and returns the number of copied values.
    fn values(&self, buffer: &mut [DbValue]) -> RfResult<usize> {
        let count = std::cmp::min(buffer.len(), self.field_count());
        for (ordinal, slot) in buffer.iter_mut().take(count).enumerate() {
            *slot = self.value(ordinal)?;
        }
        Ok(count)
    }
}

impl<C: RowCursor + ?Sized> RowCursor for Box<C> {
    fn field_count(&self) -> usize {
        (**self).field_count()
    }
    fn field_name(&self, ordinal: usize) -> RfResult<String> {
        (**self).field_name(ordinal)
    }
    fn read_next(&mut self) -> RfResult<bool> {
        (**self).read_next()
    }
    fn value(&self, ordinal: usize) -> RfResult<DbValue> {
        (**self).value(ordinal)
    }
    fn values(&self, buffer: &mut [DbValue]) -> RfResult<usize> {
        (**self).values(buffer)
    }
}
