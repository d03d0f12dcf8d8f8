//! Synchronous row materialization for forward-only database cursors.
//!
//! `rowflow` reads the rows of a [`RowCursor`] through reusable buffers from a
//! process-wide [`BufferPool`], so that iterating over large results does not allocate
//! per row. The rows can be
//!
//! * consumed lazily as raw values ([`ResultReader::rows`]),
//! * mapped onto any type that implements `serde::Deserialize` ([`ResultReader::results`]),
//! * materialized into memory ([`ResultReader::retrieve`], [`ResultReader::collect_results`]),
//! * or published into a bounded queue that is consumed by another thread
//!   ([`ResultReader::publish`], [`bounded_queue`]).
//!
//! Columns are matched by name, ignoring case; the properties of the target type are
//! its serde field names.
//!
//! See [code examples](crate::code_examples) for an overview.
//!

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

/// Settings that influence how a [`ResultReader`] reads.
///
/// # Example
///
/// ```rust,ignore
/// let reader = ResultReader::new(cursor)?.with_configuration(
///     ReadConfiguration::default()
///         .with_clear_buffers(true)
///         .with_ignore_missing_columns(true),
/// );
/// ```
pub use rowflow_impl::ReadConfiguration;

pub use rowflow_impl::{
    run_in_transaction, usage_err, BufferPool, ColumnPlan, Command, CommandBehavior,
    CommandExecutor, CommandKind, DbValue, DeserializationError, PlannedColumn,
    PoolConfiguration, PoolStatistics, Processor, QueryResult, RfError, RfResult, RowBuffer,
    RowCursor, RowSchema, TransactionOutcome, Transactional, Transformer,
};

pub use rowflow_impl::sync::{
    bounded_queue, MappedRows, PooledConnection, QueueReceiver, QueueSender, ResultReader,
    RowSequence, RowSink, SingleConnectionPool,
};

pub mod code_examples;
