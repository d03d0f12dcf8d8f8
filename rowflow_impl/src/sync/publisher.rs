use super::RowSink;
use crate::base::CursorAdapter;
use crate::{BufferPool, ColumnPlan, DbValue, RfResult, RowCursor};

// Drives the cursor and pushes one item per row into the sink.
//
// Stops at the end of the cursor, at the first rejected push (the row that was
// already read is then lost), or at the first error.
// Returns the number of pushed items.
pub(crate) struct Publisher<'a, C> {
    pub(crate) adapter: &'a mut CursorAdapter<C>,
    pub(crate) plan: &'a ColumnPlan,
    pub(crate) pool: &'a BufferPool,
    pub(crate) clear: bool,
}

impl<'a, C: RowCursor> Publisher<'a, C> {
    pub(crate) fn publish<T, S, F>(
        mut self,
        sink: &mut S,
        complete_on_finish: bool,
        produce: F,
    ) -> RfResult<usize>
    where
        S: RowSink<T> + ?Sized,
        F: FnMut(&[DbValue]) -> RfResult<T>,
    {
        match self.pump(sink, produce) {
            Ok(count) => {
                if complete_on_finish {
                    sink.complete();
                }
                Ok(count)
            }
            Err(e) => {
                debug!("Publisher::publish(): faulted after {} rows with {e}", self.adapter.rows_read());
                if complete_on_finish {
                    sink.fault(&e);
                }
                Err(e)
            }
        }
    }

    fn pump<T, S, F>(&mut self, sink: &mut S, mut produce: F) -> RfResult<usize>
    where
        S: RowSink<T> + ?Sized,
        F: FnMut(&[DbValue]) -> RfResult<T>,
    {
        let mut count = 0;
        loop {
            let mut buffer = self.pool.rent(self.plan.len());
            let item = match self.adapter.read_into(self.plan, &mut buffer) {
                Ok(true) => produce(&*buffer),
                Ok(false) => {
                    self.pool.give_back(buffer, self.clear);
                    trace!("Publisher::pump(): cursor exhausted, {count} rows published");
                    return Ok(count);
                }
                Err(e) => Err(e),
            };
            self.pool.give_back(buffer, self.clear);

            if !sink.send(item?) {
                debug!("Publisher::pump(): sink rejected row {}, stopping", count + 1);
                return Ok(count);
            }
            count += 1;
        }
    }
}
