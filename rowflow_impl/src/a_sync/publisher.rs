use super::{AsyncRowCursor, AsyncRowSink};
use crate::base::CursorAdapter;
use crate::{BufferPool, ColumnPlan, DbValue, RfError, RfResult};
use tokio_util::sync::CancellationToken;

enum Ending {
    Finished(usize),
    Cancelled(usize),
}

// Drives the cursor and pushes one item per row into the sink.
//
// Stops at the end of the cursor, at the first rejected push (the row that was
// already read is then lost), at the first error, or when the token is cancelled.
// A cancellation is noticed before a read and while a push waits for capacity;
// it ends publishing like a rejected push, but is reported as `RfError::Cancelled`.
pub(crate) struct Publisher<'a, C> {
    pub(crate) adapter: &'a mut CursorAdapter<C>,
    pub(crate) plan: &'a ColumnPlan,
    pub(crate) pool: &'a BufferPool,
    pub(crate) clear: bool,
    pub(crate) token: CancellationToken,
}

impl<'a, C: AsyncRowCursor> Publisher<'a, C> {
    pub(crate) async fn publish<T, S, F>(
        mut self,
        sink: &mut S,
        complete_on_finish: bool,
        produce: F,
    ) -> RfResult<usize>
    where
        T: Send,
        S: AsyncRowSink<T> + ?Sized,
        F: FnMut(&[DbValue]) -> RfResult<T>,
    {
        match self.pump(sink, produce).await {
            Ok(Ending::Finished(count)) => {
                if complete_on_finish {
                    sink.complete().await;
                }
                Ok(count)
            }
            Ok(Ending::Cancelled(count)) => {
                debug!("Publisher::publish(): cancelled after publishing {count} rows");
                if complete_on_finish {
                    sink.complete().await;
                }
                Err(RfError::Cancelled)
            }
            Err(e) => {
                debug!(
                    "Publisher::publish(): faulted after {} rows with {e}",
                    self.adapter.rows_read()
                );
                if complete_on_finish {
                    sink.fault(&e).await;
                }
                Err(e)
            }
        }
    }

    async fn pump<T, S, F>(&mut self, sink: &mut S, mut produce: F) -> RfResult<Ending>
    where
        T: Send,
        S: AsyncRowSink<T> + ?Sized,
        F: FnMut(&[DbValue]) -> RfResult<T>,
    {
        let mut count = 0;
        loop {
            if self.token.is_cancelled() {
                return Ok(Ending::Cancelled(count));
            }
            if !self.adapter.read_next_async().await? {
                trace!("Publisher::pump(): cursor exhausted, {count} rows published");
                return Ok(Ending::Finished(count));
            }

            // no suspension while the buffer is rented
            let mut buffer = self.pool.rent(self.plan.len());
            let item = self
                .adapter
                .fill(self.plan, &mut buffer)
                .and_then(|()| produce(&*buffer));
            self.pool.give_back(buffer, self.clear);
            let item = item?;

            let accepted = tokio::select! {
                biased;
                () = self.token.cancelled() => return Ok(Ending::Cancelled(count)),
                accepted = sink.send(item) => accepted,
            };
            if !accepted {
                debug!("Publisher::pump(): sink rejected row {}, stopping", count + 1);
                return Ok(Ending::Finished(count));
            }
            count += 1;
        }
    }
}
