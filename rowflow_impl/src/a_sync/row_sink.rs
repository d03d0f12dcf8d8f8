use crate::{RfError, RfResult};
use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};

/// A push-based consumer of asynchronously published rows.
#[async_trait]
pub trait AsyncRowSink<T: Send>: Send {
    /// Offers an item to the sink, waiting while the sink is full.
    ///
    /// Returns `false` if the sink does not accept the item; the item is then dropped.
    async fn send(&mut self, item: T) -> bool;

    /// Signals that no further items will be sent.
    async fn complete(&mut self);

    /// Signals that the producer failed with the given error.
    async fn fault(&mut self, error: &RfError);
}

#[async_trait]
impl<T: Send> AsyncRowSink<T> for Vec<T> {
    async fn send(&mut self, item: T) -> bool {
        self.push(item);
        true
    }
    async fn complete(&mut self) {}
    async fn fault(&mut self, _error: &RfError) {}
}

/// Creates a bounded queue with the given capacity.
///
/// # Errors
///
/// `RfError::ArgumentInvalid` if `capacity` is 0.
pub fn async_bounded_queue<T>(
    capacity: usize,
) -> RfResult<(AsyncQueueSender<T>, AsyncQueueReceiver<T>)> {
    if capacity == 0 {
        return Err(RfError::ArgumentInvalid("queue capacity must not be 0"));
    }
    let (tx, rx) = mpsc::channel(capacity);
    Ok((
        AsyncQueueSender {
            tx: Some(tx),
            non_blocking: false,
        },
        AsyncQueueReceiver { rx },
    ))
}

/// The sending side of an [`async_bounded_queue`].
#[derive(Debug)]
pub struct AsyncQueueSender<T> {
    tx: Option<Sender<RfResult<T>>>,
    non_blocking: bool,
}

impl<T> AsyncQueueSender<T> {
    /// Lets `send` reject items when the queue is full, rather than wait.
    #[must_use]
    pub fn non_blocking(mut self) -> Self {
        self.non_blocking = true;
        self
    }

    /// Returns `true` if neither `complete` nor `fault` was called yet.
    pub fn is_open(&self) -> bool {
        self.tx.is_some()
    }
}

#[async_trait]
impl<T: Send> AsyncRowSink<T> for AsyncQueueSender<T> {
    async fn send(&mut self, item: T) -> bool {
        let Some(ref tx) = self.tx else {
            return false;
        };
        if self.non_blocking {
            match tx.try_send(Ok(item)) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    trace!("AsyncQueueSender::send(): queue is full, rejecting");
                    false
                }
                Err(TrySendError::Closed(_)) => false,
            }
        } else {
            tx.send(Ok(item)).await.is_ok()
        }
    }

    async fn complete(&mut self) {
        self.tx.take();
    }

    async fn fault(&mut self, error: &RfError) {
        if let Some(tx) = self.tx.take() {
            tx.send(Err(RfError::SinkFaulted(error.to_string())))
                .await
                .ok();
        }
    }
}

/// The receiving side of an [`async_bounded_queue`].
///
/// If the sender is faulted, the last item is an `Err(RfError::SinkFaulted)`.
#[derive(Debug)]
pub struct AsyncQueueReceiver<T> {
    rx: Receiver<RfResult<T>>,
}

impl<T> AsyncQueueReceiver<T> {
    /// Waits for the next item; returns `None` once the sender is completed or dropped.
    pub async fn recv(&mut self) -> Option<RfResult<T>> {
        self.rx.recv().await
    }

    /// Returns the next item if one is available without waiting.
    pub fn try_recv(&mut self) -> Option<RfResult<T>> {
        self.rx.try_recv().ok()
    }

    /// Waits for all remaining items.
    pub async fn drain(&mut self) -> Vec<RfResult<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.recv().await {
            items.push(item);
        }
        items
    }
}

#[cfg(test)]
mod test {
    use super::{async_bounded_queue, AsyncRowSink};
    use crate::RfError;

    #[tokio::test]
    async fn test_non_blocking_rejects_when_full() {
        let (tx, mut rx) = async_bounded_queue::<u32>(1).unwrap();
        let mut tx = tx.non_blocking();
        assert!(tx.send(1).await);
        assert!(!tx.send(2).await);
        assert_eq!(rx.recv().await.unwrap().unwrap(), 1);

        tx.fault(&RfError::Cancelled).await;
        assert!(!tx.is_open());
        assert!(matches!(rx.recv().await, Some(Err(RfError::SinkFaulted(_)))));
        assert!(rx.recv().await.is_none());
    }
}
