use super::AsyncRowCursor;
use crate::base::CursorAdapter;
use crate::{BufferPool, ColumnPlan, DbValue, RfResult, RowBuffer};

/// A lazy, single-pass sequence over the rows of an asynchronous cursor.
///
/// Works like its synchronous counterpart: the buffer returned by
/// [`next_row`](#method.next_row) is given back to the pool with the next call,
/// or when the sequence is dropped.
/// The buffer is rented only after the asynchronous read has completed,
/// so no buffer is held while waiting for the cursor.
#[derive(Debug)]
pub struct RowSequence<'a, C> {
    adapter: &'a mut CursorAdapter<C>,
    plan: ColumnPlan,
    pool: &'a BufferPool,
    clear: bool,
    current: Option<RowBuffer>,
    done: bool,
}

impl<'a, C: AsyncRowCursor> RowSequence<'a, C> {
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
    pub async fn next_row(&mut self) -> RfResult<Option<&[DbValue]>> {
        self.release();
        if self.done {
            return Ok(None);
        }
        match self.adapter.read_next_async().await {
            Ok(true) => {
                let mut buffer = self.pool.rent(self.plan.len());
                if let Err(e) = self.adapter.fill(&self.plan, &mut buffer) {
                    self.pool.give_back(buffer, self.clear);
                    self.done = true;
                    return Err(e);
                }
                self.current = Some(buffer);
                Ok(self.current.as_deref())
            }
            Ok(false) => {
                self.done = true;
                Ok(None)
            }
            Err(e) => {
                self.done = true;
                Err(e)
            }
        }
    }

    /// Reads all remaining rows into owned vectors.
    ///
    /// # Errors
    ///
    /// Errors of the cursor.
    pub async fn into_owned(mut self) -> RfResult<Vec<Vec<DbValue>>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row().await? {
            rows.push(row.to_vec());
        }
        Ok(rows)
    }
}

impl<'a, C> RowSequence<'a, C> {
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
