//! Code examples.
//!
//! # 1. Cursors
//!
//! `rowflow` works on top of any forward-only cursor that implements [`RowCursor`]:
//!
//! ```rust,ignore
//! use rowflow::{DbValue, RfResult, RowCursor};
//!
//! impl RowCursor for MyCursor {
//!     fn field_count(&self) -> usize { /* ... */ }
//!     fn field_name(&self, ordinal: usize) -> RfResult<String> { /* ... */ }
//!     fn read_next(&mut self) -> RfResult<bool> { /* ... */ }
//!     fn value(&self, ordinal: usize) -> RfResult<DbValue> { /* ... */ }
//! }
//! ```
//!
//! Cursors can also be obtained from a [`CommandExecutor`]:
//!
//! ```rust,ignore
//! let command = Command::new("SELECT name, age FROM persons").with_parameter("min_age", 18);
//! let mut reader = ResultReader::execute(&mut executor, &command, CommandBehavior::Default)?;
//! ```
//!
//! # 2. Iterating over rows
//!
//! Each row is read into a pooled buffer, which is only valid until the next row is read:
//!
//! ```rust,ignore
//! let mut reader = ResultReader::new(cursor)?;
//! let mut rows = reader.rows();
//! while let Some(row) = rows.next_row()? {
//!     println!("{} is {} years old", row[0], row[1]);
//! }
//! ```
//!
//! Selected columns, in the order you need them:
//!
//! ```rust,ignore
//! let mut result = reader.rows_for(&["AGE", "NAME"])?;
//! assert_eq!(result.names(), &["AGE", "NAME"]);
//! while let Some(row) = result.result_mut().next_row()? {
//!     // row[0] is the age
//! }
//! ```
//!
//! # 3. Mapping rows onto rust types
//!
//! Rows are mapped onto types that implement `serde::Deserialize`, by matching the
//! column names with the field names (ignoring case).
//! Optional fields receive `None` for NULL values, and also if the column is missing
//! and missing columns are ignored (see [`ReadConfiguration`]).
//!
//! ```rust,ignore
//! #[derive(Deserialize)]
//! struct Person {
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! for person in reader.results::<Person>()? {
//!     let person = person?;
//! }
//! // or
//! let persons: Vec<Person> = reader.collect_results()?;
//! ```
//!
//! Use a [`Transformer`] to read a field from a differently named column,
//! or to exclude it from mapping:
//!
//! ```rust,ignore
//! let transformer =
//!     Transformer::<Person>::with_overrides(vec![("name", Some("FULL_NAME")), ("age", None)])?;
//! let persons: Vec<Person> = reader.results_with(&transformer)?.collect::<RfResult<_>>()?;
//! ```
//!
//! # 4. Publishing into a bounded queue
//!
//! ```rust,ignore
//! let (mut sender, receiver) = bounded_queue::<Person>(100)?;
//! let consumer = std::thread::spawn(move || {
//!     for person in receiver {
//!         // handle person?
//!     }
//! });
//! let count = reader.publish_results(&mut sender, &Transformer::new()?, true)?;
//! ```
//!
//! If the sink rejects a row, publishing stops, and the row that was already read
//! from the cursor is lost.
//!
//! # 5. Transactions
//!
//! ```rust,ignore
//! let outcome = run_in_transaction(&mut connection, |conn| {
//!     let count = conn.execute_non_query(&Command::new("DELETE FROM persons"))?;
//!     Ok((count < 100, count))
//! })?;
//! ```
//!
//! [`CommandExecutor`]: crate::CommandExecutor
//! [`ReadConfiguration`]: crate::ReadConfiguration
//! [`RowCursor`]: crate::RowCursor
//! [`Transformer`]: crate::Transformer
