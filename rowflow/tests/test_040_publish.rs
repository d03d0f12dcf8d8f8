extern crate serde;


use log::{debug, info};
use rowflow::{
    bounded_queue, BufferPool, DbValue, PoolConfiguration, ResultReader, RfError, RfResult,
    RowSink, Transformer,
};
use serde::Deserialize;
use std::sync::{atomic::Ordering, Arc};
use test_utils::MemCursor;

// Accepts a fixed number of items and records how it was terminated.
#[derive(Default)]
struct LimitedSink {
    limit: usize,
    items: Vec<Vec<DbValue>>,
    completed: bool,
    fault: Option<String>,
}

impl RowSink<Vec<DbValue>> for LimitedSink {
    fn send(&mut self, item: Vec<DbValue>) -> bool {
        if self.items.len() < self.limit {
            self.items.push(item);
            true
        } else {
            false
        }
    }
    fn complete(&mut self) {
        self.completed = true;
    }
    fn fault(&mut self, error: &RfError) {
        self.fault = Some(error.to_string());
    }
}

#[derive(Debug, Deserialize)]
struct Person {
    id: i32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Aged {
    id: i32,
    age: u8,
}

// cargo test --test test_040_publish -- --nocapture
#[test]
fn test_040_publish() -> RfResult<()> {
    let _log_handle = test_utils::init_logger();

    test_backpressure_stop()?;
    test_fault_propagation()?;
    test_publish_to_consumer_thread()?;
    test_mapping_error_faults_sink()?;
    Ok(())
}

fn test_backpressure_stop() -> RfResult<()> {
    info!("publishing stops at the first rejected push, without reading further rows");
    let pool = Arc::new(BufferPool::new(PoolConfiguration::default()));
    let cursor = MemCursor::persons(10);
    let reads = cursor.read_counter();
    let mut reader = ResultReader::new(cursor)?.with_pool(Arc::clone(&pool));

    let mut sink = LimitedSink {
        limit: 2,
        ..LimitedSink::default()
    };
    let count = reader.publish(&mut sink, false)?;
    assert_eq!(count, 2);
    assert_eq!(reads.load(Ordering::SeqCst), 3, "the rejected row was read, no 4th read");
    assert_eq!(sink.items.len(), 2);
    assert!(!sink.completed, "sink is not touched without complete_on_finish");
    assert_eq!(pool.statistics().outstanding(), 0);

    debug!("with complete_on_finish, a rejection completes the sink");
    let mut sink = LimitedSink {
        limit: 1,
        ..LimitedSink::default()
    };
    assert_eq!(reader.publish(&mut sink, true)?, 1);
    assert!(sink.completed);
    assert_eq!(sink.items[0][0], DbValue::INT(3), "row 2 was lost with the rejection");
    Ok(())
}

fn test_fault_propagation() -> RfResult<()> {
    info!("an error of the cursor faults the sink and is returned to the caller");
    let mut reader = ResultReader::new(MemCursor::persons(5).failing_on_read(2))?;
    let mut sink = LimitedSink {
        limit: 10,
        ..LimitedSink::default()
    };
    let err = reader.publish(&mut sink, true).unwrap_err();
    assert!(matches!(err, RfError::Cursor { .. }));
    assert_eq!(sink.items.len(), 1);
    assert!(!sink.completed);
    assert_eq!(sink.fault, Some(err.to_string()));

    debug!("without complete_on_finish, the sink is left alone");
    let mut reader = ResultReader::new(MemCursor::persons(5).failing_on_read(2))?;
    let mut sink = LimitedSink {
        limit: 10,
        ..LimitedSink::default()
    };
    assert!(reader.publish(&mut sink, false).is_err());
    assert!(sink.fault.is_none());
    Ok(())
}

fn test_publish_to_consumer_thread() -> RfResult<()> {
    info!("mapped rows are published into a bounded queue that another thread drains");
    let (mut sender, receiver) = bounded_queue::<Person>(4)?;
    let consumer = std::thread::spawn(move || {
        receiver
            .map(|person| person.map(|p| (p.id, p.name)))
            .collect::<RfResult<Vec<_>>>()
    });

    let mut reader = ResultReader::new(MemCursor::persons(100))?;
    let count = reader.publish_results(&mut sender, &Transformer::<Person>::new()?, true)?;
    assert_eq!(count, 100);

    let received = consumer.join().unwrap()?;
    assert_eq!(received.len(), 100);
    assert_eq!(received[99], (99, "person 99".to_string()));

    debug!("a faulted queue delivers the error as last item");
    let (mut sender, receiver) = bounded_queue::<Person>(10)?;
    let mut reader = ResultReader::new(MemCursor::persons(5).failing_on_read(4))?;
    assert!(reader
        .publish_results(&mut sender, &Transformer::<Person>::new()?, true)
        .is_err());
    let items: Vec<_> = receiver.collect();
    assert_eq!(items.len(), 4);
    assert!(matches!(items[3], Err(RfError::SinkFaulted(_))));
    Ok(())
}

fn test_mapping_error_faults_sink() -> RfResult<()> {
    info!("a row that cannot be mapped ends publishing, faults the sink and is returned");
    let cursor = MemCursor::new(
        &["ID", "AGE"],
        vec![
            vec![DbValue::INT(1), DbValue::INT(30)],
            vec![DbValue::INT(2), DbValue::INT(300)],
            vec![DbValue::INT(3), DbValue::INT(40)],
        ],
    );
    let reads = cursor.read_counter();
    let mut reader = ResultReader::new(cursor)?;
    let (mut sender, receiver) = bounded_queue::<Aged>(10)?;

    let err = reader
        .publish_results(&mut sender, &Transformer::<Aged>::new()?, true)
        .unwrap_err();
    assert_eq!(err.property(), Some("age"));
    assert!(matches!(err, RfError::InvalidMapping { .. }));
    assert_eq!(reads.load(Ordering::SeqCst), 2, "no row is read after the failing one");
    assert!(!sender.is_open());

    let items: Vec<_> = receiver.collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().map(|a| (a.id, a.age)).ok(), Some((1, 30)));
    match &items[1] {
        Err(RfError::SinkFaulted(message)) => assert_eq!(*message, err.to_string()),
        other => panic!("unexpected item: {other:?}"),
    }
    Ok(())
}
