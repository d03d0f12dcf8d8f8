mod buffer_pool;
mod column_plan;
mod command;
mod cursor_adapter;
mod db_value;
mod pool_configuration;
mod pool_statistics;
mod query_result;
mod read_configuration;
mod row_cursor;
mod row_schema;
mod transaction;

pub(crate) use {cursor_adapter::CursorAdapter, db_value::DbValueDeserializer, row_schema::fold};

pub use {
    buffer_pool::{BufferPool, RowBuffer},
    column_plan::{ColumnPlan, PlannedColumn},
    command::{Command, CommandBehavior, CommandExecutor, CommandKind},
    db_value::DbValue,
    pool_configuration::PoolConfiguration,
    pool_statistics::PoolStatistics,
    query_result::QueryResult,
    read_configuration::ReadConfiguration,
    row_cursor::RowCursor,
    row_schema::RowSchema,
    transaction::{run_in_transaction, TransactionOutcome, Transactional},
};
