
use log::{debug, info};
use rowflow::{BufferPool, DbValue, PoolConfiguration, ReadConfiguration, ResultReader, RfResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use test_utils::MemCursor;

// cargo test --test test_010_buffer_pool -- --nocapture
#[test]
fn test_010_buffer_pool() -> RfResult<()> {
    let _log_handle = test_utils::init_logger();

    test_cleared_buffers();
    test_cap_and_oversized_buffers();
    test_concurrent_readers()?;
    Ok(())
}

fn test_cleared_buffers() {
    info!("a buffer that is given back with clear == true is reset before its next rent");
    let pool = BufferPool::new(PoolConfiguration::default());

    let mut buffer = pool.rent(3);
    buffer[0] = DbValue::from("secret");
    buffer[2] = DbValue::BIGINT(7);
    pool.give_back(buffer, true);

    let buffer = pool.rent(5);
    assert_eq!(pool.statistics().allocations(), 1, "same bucket, so the buffer is reused");
    assert!(buffer.iter().all(DbValue::is_null));

    debug!("without clear, stale values remain visible");
    let mut buffer = buffer;
    buffer[1] = DbValue::INT(1);
    pool.give_back(buffer, false);
    let buffer = pool.rent(2);
    assert_eq!(buffer[1], DbValue::INT(1));
    pool.give_back(buffer, true);
}

fn test_cap_and_oversized_buffers() {
    info!("the pool keeps at most max_buffers_per_bucket buffers, and never pools oversized ones");
    let pool = BufferPool::new(
        PoolConfiguration::default()
            .with_max_buffers_per_bucket(2)
            .with_max_buffer_length(64),
    );

    let buffers: Vec<_> = (0..3).map(|_| pool.rent(10)).collect();
    for buffer in buffers {
        pool.give_back(buffer, false);
    }
    assert_eq!(pool.free_buffers(10), 2);
    assert_eq!(pool.statistics().discards(), 1);

    let big = pool.rent(100);
    assert_eq!(big.width(), 100);
    pool.give_back(big, false);
    assert_eq!(pool.free_buffers(100), 0);
    assert_eq!(pool.statistics().outstanding(), 0);
    debug!("{}", pool.statistics());
}

fn test_concurrent_readers() -> RfResult<()> {
    info!("two readers on separate threads never get the same buffer at the same time");
    let pool = Arc::new(BufferPool::new(PoolConfiguration::default()));
    let in_use: Arc<Mutex<HashSet<usize>>> = Arc::new(Mutex::new(HashSet::new()));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let pool = Arc::clone(&pool);
            let in_use = Arc::clone(&in_use);
            std::thread::spawn(move || -> RfResult<usize> {
                let mut reader = ResultReader::new(MemCursor::persons(2_000))?
                    .with_pool(pool)
                    .with_configuration(ReadConfiguration::default().with_clear_buffers(true));
                let mut rows = reader.rows();
                let mut count = 0;
                while let Some(row) = rows.next_row()? {
                    let address = row.as_ptr() as usize;
                    assert!(
                        in_use.lock().unwrap().insert(address),
                        "buffer handed out twice"
                    );
                    std::thread::yield_now();
                    in_use.lock().unwrap().remove(&address);
                    count += 1;
                }
                Ok(count)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap()?, 2_000);
    }
    let statistics = pool.statistics();
    assert_eq!(statistics.outstanding(), 0);
    assert!(statistics.allocations() <= 2, "{statistics}");
    Ok(())
}
