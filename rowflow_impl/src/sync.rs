mod mapped_rows;
mod publisher;
mod result_reader;
mod row_sequence;
mod row_sink;
mod single_connection_pool;

pub use mapped_rows::MappedRows;
pub use result_reader::ResultReader;
pub use row_sequence::RowSequence;
pub use row_sink::{bounded_queue, QueueReceiver, QueueSender, RowSink};
pub use single_connection_pool::{PooledConnection, SingleConnectionPool};
