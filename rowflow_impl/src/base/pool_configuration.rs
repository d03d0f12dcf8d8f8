// docu is written at re-exports of frontend crates (rowflow/lib.rs, rowflow_async/lib.rs)
#[derive(Debug, Clone)]
pub struct PoolConfiguration {
    max_buffers_per_bucket: usize,
    max_buffer_length: usize,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            max_buffers_per_bucket: Self::DEFAULT_MAX_BUFFERS_PER_BUCKET,
            max_buffer_length: Self::DEFAULT_MAX_BUFFER_LENGTH,
        }
    }
}
impl PoolConfiguration {
    /// Default value for the number of free buffers that are kept per size bucket.
    ///
    /// Buffers that are given back to a full bucket are dropped.
    pub const DEFAULT_MAX_BUFFERS_PER_BUCKET: usize = 1_024;

    /// Default value for the largest buffer length that is pooled.
    ///
    /// Larger buffers are allocated directly when rented and dropped when given back.
    pub const DEFAULT_MAX_BUFFER_LENGTH: usize = 1_024 * 1_024;

    /// Length of the smallest bucket; smaller requests are served from it.
    pub const MIN_BUFFER_LENGTH: usize = 16;

    /// Returns the number of free buffers that are kept per size bucket.
    pub fn max_buffers_per_bucket(&self) -> usize {
        self.max_buffers_per_bucket
    }
    /// Sets the number of free buffers that are kept per size bucket.
    pub fn set_max_buffers_per_bucket(&mut self, max_buffers_per_bucket: usize) {
        self.max_buffers_per_bucket = max_buffers_per_bucket;
    }
    /// Builder-method for setting the number of free buffers that are kept per size bucket.
    #[must_use]
    pub fn with_max_buffers_per_bucket(mut self, max_buffers_per_bucket: usize) -> Self {
        self.max_buffers_per_bucket = max_buffers_per_bucket;
        self
    }

    /// Returns the largest buffer length that is pooled.
    pub fn max_buffer_length(&self) -> usize {
        self.max_buffer_length
    }
    /// Sets the largest buffer length that is pooled.
    ///
    /// Values below [`MIN_BUFFER_LENGTH`](Self::MIN_BUFFER_LENGTH) are raised to it.
    pub fn set_max_buffer_length(&mut self, max_buffer_length: usize) {
        self.max_buffer_length = std::cmp::max(max_buffer_length, Self::MIN_BUFFER_LENGTH);
    }
    /// Builder-method for setting the largest buffer length that is pooled.
    #[must_use]
    pub fn with_max_buffer_length(mut self, max_buffer_length: usize) -> Self {
        self.set_max_buffer_length(max_buffer_length);
        self
    }
}
