use crate::base::CursorAdapter;
use crate::{BufferPool, ColumnPlan, DbValue, RfResult, RowBuffer, RowCursor};

/// A lazy, single-pass sequence over the rows of a cursor.
///
/// Each call of [`next_row`](#method.next_row) reads the next row into a buffer
/// rented from the pool. The buffer stays valid until the next call, or until the
/// sequence is dropped, and is then given back to the pool.
/// So at most one buffer is rented per sequence at any time.
///
/// ```rust,ignore
/// let mut rows = reader.rows();
/// while let Some(row) = rows.next_row()? {
///     println!("{}", row[0]);
/// }
/// ```
///
/// After the cursor is exhausted, or after an error, `next_row()` returns `Ok(None)`.
#[derive(Debug)]
pub struct RowSequence<'a, C> {
    adapter: &'a mut CursorAdapter<C>,
    plan: ColumnPlan,
    pool: &'a BufferPool,
    clear: bool,
    current: Option<RowBuffer>,
    done: bool,
}

impl<'a, C: RowCursor> RowSequence<'a, C> {
    pub(crate) fn new(
        adapter: &'a mut CursorAdapter<C>,
        plan: ColumnPlan,
        pool: &'a BufferPool,
        clear: bool,
    ) -> Self {
        Self {
            adapter,
            plan,
            pool,
            clear,
            current: None,
            done: false,
        }
    }

    /// The plan according to which the row buffers are filled.
    pub fn plan(&self) -> &ColumnPlan {
        &self.plan
    }

    /// Gives the previous row buffer back and reads the next row.
    ///
    /// # Errors
    ///
    /// Errors of the cursor; the sequence is finished then.
    pub fn next_row(&mut self) -> RfResult<Option<&[DbValue]>> {
        self.release();
        if self.done {
            return Ok(None);
        }
        let mut buffer = self.pool.rent(self.plan.len());
        match self.adapter.read_into(&self.plan, &mut buffer) {
            Ok(true) => {
                self.current = Some(buffer);
                Ok(self.current.as_deref())
            }
            Ok(false) => {
                self.pool.give_back(buffer, self.clear);
                self.done = true;
                Ok(None)
            }
            Err(e) => {
                self.pool.give_back(buffer, self.clear);
                self.done = true;
                Err(e)
            }
        }
    }

    /// Calls `f` for every remaining row.
    ///
    /// # Errors
    ///
    /// The first error of the cursor or of `f`.
    pub fn try_for_each<F>(&mut self, mut f: F) -> RfResult<()>
    where
        F: FnMut(&[DbValue]) -> RfResult<()>,
    {
        while let Some(row) = self.next_row()? {
            f(row)?;
        }
        Ok(())
    }

    /// Reads all remaining rows into owned vectors.
    ///
    /// # Errors
    ///
    /// Errors of the cursor.
    pub fn into_owned(mut self) -> RfResult<Vec<Vec<DbValue>>> {
        let mut rows = Vec::new();
        self.try_for_each(|row| {
            rows.push(row.to_vec());
            Ok(())
        })?;
        Ok(rows)
    }
}

impl<'a, C> RowSequence<'a, C> {
    // gives the current buffer back, if any
    pub(crate) fn release(&mut self) {
        if let Some(buffer) = self.current.take() {
            self.pool.give_back(buffer, self.clear);
        }
    }

    pub(crate) fn finish(&mut self) {
        self.release();
        self.done = true;
    }
}

impl<'a, C> Drop for RowSequence<'a, C> {
    fn drop(&mut self) {
        self.release();
    }
}
