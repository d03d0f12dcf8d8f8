use crate::{RfError, RfResult};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

/// A push-based consumer of published rows.
pub trait RowSink<T> {
    /// Offers an item to the sink.
    ///
    /// Returns `false` if the sink does not accept the item (e.g. because it is closed);
    /// the item is then dropped.
    fn send(&mut self, item: T) -> bool;

    /// Signals that no further items will be sent.
    fn complete(&mut self);

    /// Signals that the producer failed with the given error.
    fn fault(&mut self, error: &RfError);
}

/// Collects all items; never rejects, ignores completion and faults.
impl<T> RowSink<T> for Vec<T> {
    fn send(&mut self, item: T) -> bool {
        self.push(item);
        true
    }
    fn complete(&mut self) {}
    fn fault(&mut self, _error: &RfError) {}
}

/// Creates a bounded queue with the given capacity.
///
/// The sender implements [`RowSink`], the receiver is an iterator over the sent items.
/// By default, sending blocks while the queue is full; see [`QueueSender::non_blocking`].
///
/// # Errors
///
/// `RfError::ArgumentInvalid` if `capacity` is 0.
pub fn bounded_queue<T>(capacity: usize) -> RfResult<(QueueSender<T>, QueueReceiver<T>)> {
    if capacity == 0 {
        return Err(RfError::ArgumentInvalid("queue capacity must not be 0"));
    }
    let (tx, rx) = mpsc::sync_channel(capacity);
    Ok((
        QueueSender {
            tx: Some(tx),
            non_blocking: false,
        },
        QueueReceiver { rx },
    ))
}

/// The sending side of a [`bounded_queue`].
///
/// Dropping the sender has the same effect as [`complete`](RowSink::complete).
#[derive(Debug)]
pub struct QueueSender<T> {
    tx: Option<SyncSender<RfResult<T>>>,
    non_blocking: bool,
}

impl<T> QueueSender<T> {
    /// Lets `send` reject items when the queue is full, rather than block.
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

impl<T> RowSink<T> for QueueSender<T> {
    fn send(&mut self, item: T) -> bool {
        let Some(ref tx) = self.tx else {
            return false;
        };
        if self.non_blocking {
            match tx.try_send(Ok(item)) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    trace!("QueueSender::send(): queue is full, rejecting");
                    false
                }
                Err(TrySendError::Disconnected(_)) => false,
            }
        } else {
            tx.send(Ok(item)).is_ok()
        }
    }

    fn complete(&mut self) {
        self.tx.take();
    }

    fn fault(&mut self, error: &RfError) {
        if let Some(tx) = self.tx.take() {
            // the receiver might be gone already
            tx.send(Err(RfError::SinkFaulted(error.to_string()))).ok();
        }
    }
}

/// The receiving side of a [`bounded_queue`].
///
/// Iterates over the sent items until the sender completes; if the sender is faulted,
/// the last item is an `Err(RfError::SinkFaulted)`.
#[derive(Debug)]
pub struct QueueReceiver<T> {
    rx: Receiver<RfResult<T>>,
}

impl<T> QueueReceiver<T> {
    /// Waits for the next item; returns `None` once the sender is completed or dropped.
    pub fn recv(&self) -> Option<RfResult<T>> {
        self.rx.recv().ok()
    }

    /// Returns the next item if one is available without waiting.
    pub fn try_recv(&self) -> Option<RfResult<T>> {
        self.rx.try_recv().ok()
    }
}

impl<T> Iterator for QueueReceiver<T> {
    type Item = RfResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}
