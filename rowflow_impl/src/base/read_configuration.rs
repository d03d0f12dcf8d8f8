// docu is written at re-exports of frontend crates (rowflow/lib.rs, rowflow_async/lib.rs)
#[derive(Debug, Clone, Default)]
pub struct ReadConfiguration {
    clear_buffers: bool,
    ignore_missing_columns: bool,
}

impl ReadConfiguration {
    /// Returns whether rented buffers are cleared when they are given back to the pool.
    pub fn is_clear_buffers(&self) -> bool {
        self.clear_buffers
    }
    /// Defines whether rented buffers are cleared when they are given back to the pool.
    pub fn set_clear_buffers(&mut self, clear_buffers: bool) {
        self.clear_buffers = clear_buffers;
    }
    /// Builder-method for defining whether rented buffers are cleared when they are
    /// given back to the pool.
    #[must_use]
    pub fn with_clear_buffers(mut self, clear_buffers: bool) -> Self {
        self.clear_buffers = clear_buffers;
        self
    }

    /// Returns whether requested columns that are not part of the result are tolerated.
    pub fn is_ignore_missing_columns(&self) -> bool {
        self.ignore_missing_columns
    }
    /// Defines whether requested columns that are not part of the result are tolerated.
    pub fn set_ignore_missing_columns(&mut self, ignore_missing_columns: bool) {
        self.ignore_missing_columns = ignore_missing_columns;
    }
    /// Builder-method for defining whether requested columns that are not part of the
    /// result are tolerated.
    #[must_use]
    pub fn with_ignore_missing_columns(mut self, ignore_missing_columns: bool) -> Self {
        self.ignore_missing_columns = ignore_missing_columns;
        self
    }
}
