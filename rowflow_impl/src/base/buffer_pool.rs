use crate::base::pool_statistics::PoolCounters;
use crate::{DbValue, PoolConfiguration, PoolStatistics};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use debug_ignore::DebugIgnore;
use std::sync::Arc;

lazy_static! {
    static ref SHARED_POOL: Arc<BufferPool> = Arc::new(BufferPool::new(PoolConfiguration::default()));
}

/// A fixed-length sequence of field values for one row, rented from a [`BufferPool`].
///
/// The buffer dereferences to a slice of exactly `width()` values, even if the
/// underlying storage (see `capacity()`) is larger.
#[derive(Debug)]
pub struct RowBuffer {
    values: Vec<DbValue>,
    width: usize,
}

impl RowBuffer {
    /// Number of slots that are in use.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Length of the underlying storage.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Copies the used slots into an owned vector.
    pub fn to_vec(&self) -> Vec<DbValue> {
        self.values[..self.width].to_vec()
    }

    // identity of the storage, stable while the buffer is alive
    #[cfg(test)]
    pub(crate) fn storage_ptr(&self) -> *const DbValue {
        self.values.as_ptr()
    }
}

impl std::ops::Deref for RowBuffer {
    type Target = [DbValue];
    fn deref(&self) -> &[DbValue] {
        &self.values[..self.width]
    }
}
impl std::ops::DerefMut for RowBuffer {
    fn deref_mut(&mut self) -> &mut [DbValue] {
        &mut self.values[..self.width]
    }
}

/// A pool of reusable value buffers, bucketed by power-of-two lengths.
///
/// `rent()` never fails: if the matching bucket is empty, or the requested length
/// exceeds the largest pooled length, a fresh buffer is allocated.
/// `give_back()` puts the buffer back into its bucket, unless the bucket already
/// holds `max_buffers_per_bucket` free buffers, in which case the buffer is dropped.
///
/// The pool is safe for concurrent use; the free buffers of each bucket are held
/// in a bounded channel with capacity `max_buffers_per_bucket`.
#[derive(Debug)]
pub struct BufferPool {
    config: PoolConfiguration,
    buckets: DebugIgnore<Vec<Bucket>>,
    counters: PoolCounters,
}

// free list of one bucket
type Bucket = (Sender<Vec<DbValue>>, Receiver<Vec<DbValue>>);

impl BufferPool {
    /// Creates a new pool.
    pub fn new(config: PoolConfiguration) -> Self {
        let number_of_buckets = bucket_index(config.max_buffer_length()) + 1;
        let buckets = (0..number_of_buckets)
            .map(|_| bounded(config.max_buffers_per_bucket()))
            .collect::<Vec<Bucket>>();
        Self {
            config,
            buckets: DebugIgnore::from(buckets),
            counters: PoolCounters::default(),
        }
    }

    /// Returns the process-wide pool, which is created on first use
    /// with the default configuration.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED_POOL)
    }

    /// Returns the configuration of the pool.
    pub fn configuration(&self) -> &PoolConfiguration {
        &self.config
    }

    /// Returns a snapshot of the usage counters.
    pub fn statistics(&self) -> PoolStatistics {
        self.counters.snapshot()
    }

    /// Rents a buffer with `width` usable slots.
    ///
    /// Slots of a recycled buffer keep whatever the previous renter left in them,
    /// unless that renter gave the buffer back with `clear == true`.
    pub fn rent(&self, width: usize) -> RowBuffer {
        if width > self.config.max_buffer_length() {
            trace!("BufferPool::rent(): {width} exceeds the pooled lengths, allocating");
            self.counters.add_rent(true);
            return RowBuffer {
                values: vec![DbValue::NULL; width],
                width,
            };
        }
        let idx = bucket_index(width);
        let recycled = self.buckets[idx].1.try_recv().ok();
        self.counters.add_rent(recycled.is_none());
        let values = recycled.unwrap_or_else(|| vec![DbValue::NULL; bucket_length(idx)]);
        RowBuffer { values, width }
    }

    /// Gives a rented buffer back to the pool.
    ///
    /// With `clear == true`, all slots are reset to `DbValue::NULL` before the
    /// buffer becomes available again, so that no values are retained by the pool.
    pub fn give_back(&self, buffer: RowBuffer, clear: bool) {
        let mut values = buffer.values;
        let len = values.len();
        let poolable = len.is_power_of_two()
            && len >= PoolConfiguration::MIN_BUFFER_LENGTH
            && bucket_index(len) < self.buckets.len();

        let discarded = if poolable {
            if clear {
                values.fill(DbValue::NULL);
            }
            match self.buckets[bucket_index(len)].0.try_send(values) {
                Ok(()) => false,
                Err(TrySendError::Full(_)) => {
                    debug!("BufferPool::give_back(): bucket for length {len} is full, dropping buffer");
                    true
                }
                // the pool holds both ends of every bucket
                Err(TrySendError::Disconnected(_)) => true,
            }
        } else {
            true
        };
        self.counters.add_return(discarded);
    }

    /// Number of free buffers currently held for the given width.
    pub fn free_buffers(&self, width: usize) -> usize {
        if width > self.config.max_buffer_length() {
            0
        } else {
            self.buckets[bucket_index(width)].1.len()
        }
    }
}

// bucket 0 holds buffers of length MIN_BUFFER_LENGTH, each next bucket doubles
fn bucket_index(width: usize) -> usize {
    let width = std::cmp::max(width, PoolConfiguration::MIN_BUFFER_LENGTH);
    let bits = (usize::BITS - (width - 1).leading_zeros()) as usize;
    bits - PoolConfiguration::MIN_BUFFER_LENGTH.trailing_zeros() as usize
}

fn bucket_length(idx: usize) -> usize {
    PoolConfiguration::MIN_BUFFER_LENGTH << idx
}

#[cfg(test)]
mod test {
    use super::{bucket_index, bucket_length, BufferPool};
    use crate::{DbValue, PoolConfiguration};
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_bucket_sizing() {
        assert_eq!(bucket_index(0), 0);
        assert_eq!(bucket_index(1), 0);
        assert_eq!(bucket_index(16), 0);
        assert_eq!(bucket_index(17), 1);
        assert_eq!(bucket_index(32), 1);
        assert_eq!(bucket_index(33), 2);
        assert_eq!(bucket_length(bucket_index(1000)), 1024);
    }

    #[test]
    fn test_rent_and_reuse() {
        let pool = BufferPool::new(PoolConfiguration::default());
        let buffer = pool.rent(3);
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.len(), 3);
        assert!(buffer.capacity() >= 3);
        let ptr = buffer.storage_ptr();
        pool.give_back(buffer, false);
        assert_eq!(pool.free_buffers(3), 1);

        // a different width from the same bucket reuses the storage
        let buffer = pool.rent(10);
        assert_eq!(buffer.storage_ptr(), ptr);
        assert_eq!(buffer.width(), 10);
        pool.give_back(buffer, false);

        let stats = pool.statistics();
        assert_eq!(stats.rents(), 2);
        assert_eq!(stats.returns(), 2);
        assert_eq!(stats.allocations(), 1);
        assert_eq!(stats.outstanding(), 0);
    }

    #[test]
    fn test_clear_on_return() {
        let pool = BufferPool::new(PoolConfiguration::default());
        let mut buffer = pool.rent(2);
        buffer[0] = DbValue::from("retained");
        buffer[1] = DbValue::INT(1);
        pool.give_back(buffer, false);
        let mut buffer = pool.rent(2);
        assert_eq!(buffer[0], DbValue::from("retained"));

        buffer[0] = DbValue::from("dropped");
        pool.give_back(buffer, true);
        let buffer = pool.rent(16);
        assert!(buffer.iter().all(DbValue::is_null));
        pool.give_back(buffer, false);
    }

    #[test]
    fn test_bucket_cap() {
        let pool = BufferPool::new(PoolConfiguration::default().with_max_buffers_per_bucket(2));
        let buffers: Vec<_> = (0..3).map(|_| pool.rent(4)).collect();
        for buffer in buffers {
            pool.give_back(buffer, false);
        }
        assert_eq!(pool.free_buffers(4), 2);
        assert_eq!(pool.statistics().discards(), 1);
    }

    #[test]
    fn test_bucket_cap_zero_keeps_nothing() {
        let pool = BufferPool::new(PoolConfiguration::default().with_max_buffers_per_bucket(0));
        let buffer = pool.rent(4);
        pool.give_back(buffer, false);
        assert_eq!(pool.free_buffers(4), 0);
        let buffer = pool.rent(4);
        pool.give_back(buffer, false);
        let stats = pool.statistics();
        assert_eq!(stats.allocations(), 2);
        assert_eq!(stats.discards(), 2);
    }

    #[test]
    fn test_oversized_rent() {
        let pool = BufferPool::new(PoolConfiguration::default().with_max_buffer_length(64));
        let buffer = pool.rent(65);
        assert_eq!(buffer.capacity(), 65);
        pool.give_back(buffer, true);
        assert_eq!(pool.free_buffers(65), 0);
        assert_eq!(pool.statistics().discards(), 1);
        assert_eq!(pool.statistics().outstanding(), 0);
    }

    #[test]
    fn test_no_buffer_is_handed_out_twice() {
        let pool = Arc::new(BufferPool::new(PoolConfiguration::default()));
        let live = Arc::new(Mutex::new(HashSet::<usize>::new()));

        let handles: Vec<_> = (0..2)
            .map(|t| {
                let pool = Arc::clone(&pool);
                let live = Arc::clone(&live);
                std::thread::spawn(move || {
                    for i in 0..2_000 {
                        let mut buffer = pool.rent(1 + (i % 20));
                        let addr = buffer.storage_ptr() as usize;
                        assert!(live.lock().unwrap().insert(addr), "buffer handed out twice");
                        buffer[0] = DbValue::INT(t);
                        std::thread::yield_now();
                        assert_eq!(buffer[0], DbValue::INT(t));
                        assert!(live.lock().unwrap().remove(&addr));
                        pool.give_back(buffer, i % 2 == 0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(pool.statistics().outstanding(), 0);
    }
}
