use async_trait::async_trait;
use crate::{RfResult, RowCursor};

/// A [`RowCursor`] that can read asynchronously.
///
/// Only the read suspends; the values of the current row are always
/// extracted synchronously.
///
/// Cursors that can only read synchronously just need an empty implementation,
/// then `read_next_async` falls back to `read_next`.
#[async_trait]
pub trait AsyncRowCursor: RowCursor + Send {
    /// Moves to the next row; returns `false` if the cursor is exhausted.
    async fn read_next_async(&mut self) -> RfResult<bool> {
        self.read_next()
    }
}

/// Cursors produced by a [`CommandExecutor`](crate::CommandExecutor) read synchronously.
impl AsyncRowCursor for Box<dyn RowCursor + Send> {}
