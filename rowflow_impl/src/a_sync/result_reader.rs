use super::{publisher::Publisher, AsyncRowCursor, AsyncRowSink, MappedRows, RowSequence};
use crate::base::CursorAdapter;
use crate::{
    usage_err, BufferPool, ColumnPlan, Command, CommandBehavior, CommandExecutor, DbValue,
    QueryResult, ReadConfiguration, RfResult, RowCursor, RowSchema, Transformer,
};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Reads the rows of a forward-only cursor asynchronously.
///
/// Offers the same ways of consuming the rows as the synchronous `ResultReader`.
/// Reading from the cursor is the only operation that suspends (besides pushing
/// into a full sink while publishing); values are extracted and mapped synchronously.
///
/// ```rust,ignore
/// let mut reader = AsyncResultReader::new(cursor)?;
/// let mut persons = reader.results::<Person>()?;
/// while let Some(person) = persons.try_next().await? {
///     // ...
/// }
/// ```
#[derive(Debug)]
pub struct AsyncResultReader<C> {
    adapter: CursorAdapter<C>,
    schema: RowSchema,
    pool: Arc<BufferPool>,
    config: ReadConfiguration,
}

impl AsyncResultReader<Box<dyn RowCursor + Send>> {
    /// Executes the command and returns a reader for the produced cursor.
    ///
    /// # Errors
    ///
    /// `RfError::ArgumentInvalid` if the command is invalid; errors of the executor.
    pub fn execute(
        executor: &mut dyn CommandExecutor,
        command: &Command,
        behavior: CommandBehavior,
    ) -> RfResult<Self> {
        command.validate()?;
        debug!("AsyncResultReader::execute(): {:?} with {behavior:?}", command.kind());
        Self::new(executor.execute_reader(command, behavior)?)
    }
}

impl<C: AsyncRowCursor> AsyncResultReader<C> {
    /// Creates a reader that uses the process-wide buffer pool.
    ///
    /// # Errors
    ///
    /// Errors of the cursor while its column names are retrieved.
    pub fn new(cursor: C) -> RfResult<Self> {
        let schema = RowSchema::from_cursor(&cursor)?;
        trace!("AsyncResultReader::new(): {} columns", schema.len());
        Ok(Self {
            adapter: CursorAdapter::new(cursor),
            schema,
            pool: BufferPool::shared(),
            config: ReadConfiguration::default(),
        })
    }

    /// Lets the reader use the given buffer pool.
    #[must_use]
    pub fn with_pool(mut self, pool: Arc<BufferPool>) -> Self {
        self.pool = pool;
        self
    }

    /// Lets the reader use the given configuration.
    #[must_use]
    pub fn with_configuration(mut self, config: ReadConfiguration) -> Self {
        self.config = config;
        self
    }

    /// The configuration of the reader.
    pub fn configuration(&self) -> &ReadConfiguration {
        &self.config
    }

    /// The buffer pool of the reader.
    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    /// The column names of the cursor.
    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    /// Number of rows read so far.
    pub fn rows_read(&self) -> usize {
        self.adapter.rows_read()
    }

    /// Returns the cursor.
    pub fn into_cursor(self) -> C {
        self.adapter.into_inner()
    }

    /// Resolves the given column names against the schema of the cursor.
    ///
    /// # Errors
    ///
    /// `RfError::ArgumentInvalid` if no or blank names are given.
    ///
    /// `RfError::SchemaMismatch` if a column does not exist and missing columns
    /// are not ignored.
    pub fn plan<S: AsRef<str>>(&self, columns: &[S]) -> RfResult<ColumnPlan> {
        ColumnPlan::resolve(columns, &self.schema, self.config.is_ignore_missing_columns())
    }

    /// Lazy sequence over all columns of the remaining rows.
    pub fn rows(&mut self) -> RowSequence<'_, C> {
        let plan = ColumnPlan::all(&self.schema);
        self.sequence(plan)
    }

    /// Lazy sequence over the given columns of the remaining rows.
    ///
    /// # Errors
    ///
    /// See [`plan`](#method.plan).
    pub fn rows_for<S: AsRef<str>>(
        &mut self,
        columns: &[S],
    ) -> RfResult<QueryResult<RowSequence<'_, C>>> {
        let plan = self.plan(columns)?;
        Ok(QueryResult::new(&plan, self.sequence(plan.clone())))
    }

    /// Reads the given columns of all remaining rows into memory.
    ///
    /// # Errors
    ///
    /// See [`plan`](#method.plan); errors of the cursor.
    pub async fn retrieve<S: AsRef<str>>(
        &mut self,
        columns: &[S],
    ) -> RfResult<QueryResult<VecDeque<Vec<DbValue>>>> {
        let plan = self.plan(columns)?;
        let mut queue = VecDeque::new();
        let mut rows = self.sequence(plan.clone());
        while let Some(row) = rows.next_row().await? {
            queue.push_back(row.to_vec());
        }
        drop(rows);
        debug!("AsyncResultReader::retrieve(): {} rows", queue.len());
        Ok(QueryResult::new(&plan, queue))
    }

    /// Reads the first column of all remaining rows.
    ///
    /// # Errors
    ///
    /// `RfError::UsageDetailed` if the cursor has no columns; errors of the cursor.
    pub async fn first_ordinal_values(&mut self) -> RfResult<Vec<DbValue>> {
        if self.schema.is_empty() {
            return Err(usage_err!("first_ordinal_values(): the cursor has no columns"));
        }
        let mut values = Vec::new();
        while self.adapter.read_next_async().await? {
            values.push(self.adapter.value(0)?);
        }
        Ok(values)
    }

    /// Lazy sequence of the remaining rows, mapped onto `T`.
    ///
    /// # Errors
    ///
    /// `RfError::Deserialization` if `T` is not a struct with named fields;
    /// see also [`plan`](#method.plan).
    pub fn results<T>(&mut self) -> RfResult<MappedRows<'_, C, T>>
    where
        T: DeserializeOwned + 'static,
    {
        let transformer = Transformer::<T>::new()?;
        self.results_with(&transformer)
    }

    /// Lazy sequence of the remaining rows, mapped onto `T` with the given transformer.
    ///
    /// # Errors
    ///
    /// See [`plan`](#method.plan).
    pub fn results_with<T>(
        &mut self,
        transformer: &Transformer<T>,
    ) -> RfResult<MappedRows<'_, C, T>>
    where
        T: DeserializeOwned + 'static,
    {
        let plan = self.mapping_plan(transformer)?;
        let processor = transformer.processor(&plan);
        Ok(MappedRows::new(self.sequence(plan), processor))
    }

    /// Reads all remaining rows, mapped onto `T`.
    ///
    /// # Errors
    ///
    /// See [`results`](#method.results); the first mapping error aborts.
    pub async fn collect_results<T>(&mut self) -> RfResult<Vec<T>>
    where
        T: DeserializeOwned + 'static,
    {
        self.results::<T>()?.try_collect().await
    }

    /// Calls `predicate` with each remaining row until it returns `false`.
    ///
    /// Returns the number of rows for which the predicate was called.
    ///
    /// # Errors
    ///
    /// The first error of the cursor or of `predicate`.
    pub async fn read_while<F>(&mut self, mut predicate: F) -> RfResult<usize>
    where
        F: FnMut(&[DbValue]) -> RfResult<bool>,
    {
        let mut visited = 0;
        let mut rows = self.rows();
        while let Some(row) = rows.next_row().await? {
            visited += 1;
            if !predicate(row)? {
                break;
            }
        }
        Ok(visited)
    }

    /// Pushes all remaining rows into the sink, as owned vectors of all columns.
    ///
    /// Publishing stops when the cursor is exhausted, when the sink rejects a row
    /// (that row is lost then), or when `token` is cancelled.
    /// Returns the number of rows the sink accepted.
    ///
    /// With `complete_on_finish == true`, the sink is completed when publishing stops
    /// or is cancelled, and faulted if an error occurs.
    ///
    /// # Errors
    ///
    /// `RfError::Cancelled` if `token` was cancelled; errors of the cursor.
    pub async fn publish<S>(
        &mut self,
        sink: &mut S,
        complete_on_finish: bool,
        token: CancellationToken,
    ) -> RfResult<usize>
    where
        S: AsyncRowSink<Vec<DbValue>> + ?Sized,
    {
        let plan = ColumnPlan::all(&self.schema);
        self.publisher(&plan, token)
            .publish(sink, complete_on_finish, |row| Ok(row.to_vec()))
            .await
    }

    /// Pushes all remaining rows into the sink, mapped onto `T`.
    ///
    /// Behaves like [`publish`](#method.publish); mapping errors end publishing
    /// like errors of the cursor.
    ///
    /// # Errors
    ///
    /// `RfError::Cancelled` if `token` was cancelled; see [`plan`](#method.plan);
    /// errors of the cursor and of the mapping.
    pub async fn publish_results<T, S>(
        &mut self,
        sink: &mut S,
        transformer: &Transformer<T>,
        complete_on_finish: bool,
        token: CancellationToken,
    ) -> RfResult<usize>
    where
        T: DeserializeOwned + Send + 'static,
        S: AsyncRowSink<T> + ?Sized,
    {
        let plan = self.mapping_plan(transformer)?;
        let processor = transformer.processor(&plan);
        self.publisher(&plan, token)
            .publish(sink, complete_on_finish, |row| processor.transform(row))
            .await
    }

    // a transformer that excludes all properties reads no column
    fn mapping_plan<T>(&self, transformer: &Transformer<T>) -> RfResult<ColumnPlan>
    where
        T: DeserializeOwned + 'static,
    {
        let columns = transformer.column_names();
        if columns.is_empty() {
            Ok(ColumnPlan::empty())
        } else {
            self.plan(&columns)
        }
    }

    fn sequence(&mut self, plan: ColumnPlan) -> RowSequence<'_, C> {
        RowSequence::new(
            &mut self.adapter,
            plan,
            &self.pool,
            self.config.is_clear_buffers(),
        )
    }

    fn publisher<'a>(
        &'a mut self,
        plan: &'a ColumnPlan,
        token: CancellationToken,
    ) -> Publisher<'a, C> {
        Publisher {
            adapter: &mut self.adapter,
            plan,
            pool: &self.pool,
            clear: self.config.is_clear_buffers(),
            token,
        }
    }
}
