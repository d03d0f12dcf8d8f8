//! Asynchronous row materialization for forward-only database cursors.
//!
//! `rowflow_async` offers the functionality of `rowflow` for async code, based on
//! [`tokio`](https://docs.rs/tokio).
//!
//! Cursors implement [`AsyncRowCursor`]; reading from the cursor is the only
//! operation that suspends, values are always extracted and mapped synchronously.
//! Cursors that can only read synchronously just add an empty implementation:
//!
//! ```rust,ignore
//! impl AsyncRowCursor for MyCursor {}
//! ```
//!
//! Mapped rows are consumed with [`MappedRows::try_next`]:
//!
//! ```rust,ignore
//! let mut reader = AsyncResultReader::new(cursor)?;
//! let mut persons = reader.results::<Person>()?;
//! while let Some(person) = persons.try_next().await? {
//!     // ...
//! }
//! ```
//!
//! Publishing into an [`async_bounded_queue`] can be stopped with a [`CancellationToken`]:
//!
//! ```rust,ignore
//! let (mut sender, mut receiver) = async_bounded_queue::<Vec<DbValue>>(100)?;
//! let token = CancellationToken::new();
//! let consumer = tokio::spawn(async move { receiver.drain().await });
//! let count = reader.publish(&mut sender, true, token.clone()).await?;
//! ```

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;

pub use rowflow_impl::{
    run_in_transaction, usage_err, BufferPool, ColumnPlan, Command, CommandBehavior,
    CommandExecutor, CommandKind, DbValue, DeserializationError, PlannedColumn,
    PoolConfiguration, PoolStatistics, Processor, QueryResult, ReadConfiguration, RfError,
    RfResult, RowBuffer, RowCursor, RowSchema, TransactionOutcome, Transactional, Transformer,
};

pub use rowflow_impl::a_sync::{
    async_bounded_queue, AsyncQueueReceiver, AsyncQueueSender, AsyncResultReader,
    AsyncRowCursor, AsyncRowSink, MappedRows, PooledConnection, RowSequence,
    SingleConnectionPool,
};
