//! Publish/subscribe abstraction for post-commit notifications.
//!
//! Intentionally lightweight:
//!
//! - Transport-agnostic: works with in-memory channels or anything else.
//! - Best-effort broadcast: each subscriber gets a copy of every message.
//! - No persistence: the store is the source of truth, the bus only fans out.
//!
//! Consumers must tolerate duplicates and gaps; nothing in the mutation path
//! waits on a subscriber.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a notification stream.
///
/// Designed for single-threaded consumption: one subscription per consumer
/// thread, typically drained in a loop via `recv`/`recv_timeout`.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic notification bus (pub/sub).
///
/// `publish()` may fail (bus poisoned, transport down); callers on the
/// mutation path log and continue, because notifications never gate a commit.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
