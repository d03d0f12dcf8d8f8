mod async_row_cursor;
mod mapped_rows;
mod publisher;
mod result_reader;
mod row_sequence;
mod row_sink;
mod single_connection_pool;

pub use async_row_cursor::AsyncRowCursor;
pub use mapped_rows::MappedRows;
pub use result_reader::AsyncResultReader;
pub use row_sequence::RowSequence;
pub use row_sink::{async_bounded_queue, AsyncQueueReceiver, AsyncQueueSender, AsyncRowSink};
pub use single_connection_pool::{PooledConnection, SingleConnectionPool};
