extern crate serde;


use log::{debug, info};
use rowflow_async::{
    async_bounded_queue, async_trait, AsyncResultReader, AsyncRowSink, CancellationToken, DbValue,
    RfError, RfResult, Transformer,
};
use serde::Deserialize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use test_utils::MemCursor;

// Accepts a fixed number of items and records how it was terminated.
#[derive(Default)]
struct LimitedSink {
    limit: usize,
    items: Vec<Vec<DbValue>>,
    completed: bool,
    fault: Option<String>,
}

#[async_trait]
impl AsyncRowSink<Vec<DbValue>> for LimitedSink {
    async fn send(&mut self, item: Vec<DbValue>) -> bool {
        if self.items.len() < self.limit {
            self.items.push(item);
            true
        } else {
            false
        }
    }
    async fn complete(&mut self) {
        self.completed = true;
    }
    async fn fault(&mut self, error: &RfError) {
        self.fault = Some(error.to_string());
    }
}

#[derive(Debug, Deserialize)]
struct Person {
    id: i32,
}

#[derive(Debug, Deserialize)]
struct Aged {
    id: i32,
    age: u8,
}

// cargo test --test test_020_publish -- --nocapture
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_020_publish() -> RfResult<()> {
    let _log_handle = test_utils::init_logger();

    test_backpressure_stop().await?;
    test_fault_propagation().await?;
    test_publish_to_consumer_task().await?;
    test_cancellation().await?;
    test_mapping_error_faults_sink().await?;
    Ok(())
}

async fn test_backpressure_stop() -> RfResult<()> {
    info!("publishing stops at the first rejected push, without reading further rows");
    let cursor = MemCursor::persons(10);
    let reads = cursor.read_counter();
    let mut reader = AsyncResultReader::new(cursor)?;
    let mut sink = LimitedSink {
        limit: 2,
        ..LimitedSink::default()
    };
    let count = reader
        .publish(&mut sink, true, CancellationToken::new())
        .await?;
    assert_eq!(count, 2);
    assert_eq!(reads.load(Ordering::SeqCst), 3);
    assert!(sink.completed);
    Ok(())
}

async fn test_fault_propagation() -> RfResult<()> {
    info!("an error of the cursor faults the sink and is returned to the caller");
    let mut reader = AsyncResultReader::new(MemCursor::persons(5).failing_on_read(2))?;
    let mut sink = LimitedSink {
        limit: 10,
        ..LimitedSink::default()
    };
    let err = reader
        .publish(&mut sink, true, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RfError::Cursor { .. }));
    assert_eq!(sink.items.len(), 1);
    assert_eq!(sink.fault, Some(err.to_string()));
    assert!(!sink.completed);
    Ok(())
}

async fn test_publish_to_consumer_task() -> RfResult<()> {
    info!("mapped rows are published into a bounded queue that another task drains");
    let (mut sender, mut receiver) = async_bounded_queue::<Person>(3)?;
    let consumer = tokio::spawn(async move { receiver.drain().await });

    let mut reader = AsyncResultReader::new(MemCursor::persons(50))?;
    let count = reader
        .publish_results(
            &mut sender,
            &Transformer::<Person>::new()?,
            true,
            CancellationToken::new(),
        )
        .await?;
    assert_eq!(count, 50);

    let received = consumer.await.unwrap();
    assert_eq!(received.len(), 50);
    let ids = received
        .into_iter()
        .map(|person| person.map(|p| p.id))
        .collect::<RfResult<Vec<_>>>()?;
    assert_eq!(ids, (0..50).collect::<Vec<_>>());
    Ok(())
}

async fn test_cancellation() -> RfResult<()> {
    info!("cancellation stops publishing while the push waits, and is reported as error");
    let (mut sender, mut receiver) = async_bounded_queue::<Vec<DbValue>>(2)?;
    let token = CancellationToken::new();
    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        })
    };

    let cursor = MemCursor::persons(10);
    let reads = cursor.read_counter();
    let mut reader = AsyncResultReader::new(cursor)?;
    let err = reader
        .publish(&mut sender, true, token.clone())
        .await
        .unwrap_err();
    canceller.await.unwrap();
    assert!(err.is_cancelled());
    debug!("the push of row 3 was blocked, no further row was read");
    assert_eq!(reads.load(Ordering::SeqCst), 3);
    assert!(!sender.is_open(), "the sink was completed");

    let received = receiver.drain().await;
    assert_eq!(received.len(), 2);
    assert!(received.iter().all(Result::is_ok));

    debug!("a cancelled token stops publishing before the first read");
    let cursor = MemCursor::persons(10);
    let reads = cursor.read_counter();
    let mut reader = AsyncResultReader::new(cursor)?;
    let mut sink = LimitedSink {
        limit: 10,
        ..LimitedSink::default()
    };
    assert!(reader
        .publish(&mut sink, false, token)
        .await
        .unwrap_err()
        .is_cancelled());
    assert_eq!(reads.load(Ordering::SeqCst), 0);
    assert!(sink.items.is_empty());
    Ok(())
}

async fn test_mapping_error_faults_sink() -> RfResult<()> {
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
    let mut reader = AsyncResultReader::new(cursor)?;
    let (mut sender, mut receiver) = async_bounded_queue::<Aged>(10)?;

    let err = reader
        .publish_results(
            &mut sender,
            &Transformer::<Aged>::new()?,
            true,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.property(), Some("age"));
    assert!(matches!(err, RfError::InvalidMapping { .. }));
    assert_eq!(reads.load(Ordering::SeqCst), 2);
    assert!(!sender.is_open());

    let items = receiver.drain().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().map(|a| (a.id, a.age)).ok(), Some((1, 30)));
    match &items[1] {
        Err(RfError::SinkFaulted(message)) => assert_eq!(*message, err.to_string()),
        other => panic!("unexpected item: {other:?}"),
    }
    Ok(())
}
