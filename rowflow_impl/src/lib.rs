//! Do not use this crate directly.
//!
//! This is the implementation crate for `rowflow` and `rowflow_async`.
//!
//! If you need the synchronous API, use `rowflow`.
//!
//! If you need the asynchronous API, use `rowflow_async`.
//!

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![cfg_attr(not(any(feature = "sync", feature = "async")), allow(unused_imports))]
#![cfg_attr(not(any(feature = "sync", feature = "async")), allow(dead_code))]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod base;
mod rf_error;
mod transform;

#[cfg(feature = "async")]
pub mod a_sync;
#[cfg(feature = "sync")]
pub mod sync;

pub use crate::base::{
    BufferPool, ColumnPlan, Command, CommandBehavior, CommandExecutor, CommandKind, DbValue,
    PlannedColumn, PoolConfiguration, PoolStatistics, QueryResult, ReadConfiguration, RowBuffer,
    RowCursor, RowSchema, TransactionOutcome, Transactional,
};
pub use crate::base::run_in_transaction;
pub use crate::rf_error::{RfError, RfResult};
pub use crate::transform::{DeserializationError, Processor, Transformer};
