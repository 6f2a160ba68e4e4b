//! The bounded join queue between event delivery and the worker.
//!
//! One producer (the room-event bridge), one consumer (the affiliation
//! worker), FIFO order, fixed capacity. The producer side never blocks
//! the event-delivery path indefinitely: a full queue either drops the
//! newest item with a warning or applies backpressure for a bounded
//! time, per [`OverflowPolicy`].

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;
use warden_xmpp::Jid;

/// Default queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// What the producer does when the queue is full.
///
/// Raising an error into the event-delivery path (what a naive bounded
/// queue does) is not an option here: a burst of joins must never tear
/// down the room session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the new item and log a warning. The default.
    DropNewest,

    /// Block the producer up to `timeout`, then drop with a warning.
    Backpressure {
        /// Longest the event-delivery path may be held up.
        timeout: Duration,
    },
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::DropNewest
    }
}

/// Outcome of an enqueue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// The item was queued.
    Accepted,
    /// The queue was full and the item was dropped under the policy.
    Dropped,
    /// The consumer is gone; the session is shutting down.
    Closed,
}

/// Create a join queue with the given capacity and overflow policy.
pub fn join_queue(capacity: usize, policy: OverflowPolicy) -> (JoinSender, JoinReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (JoinSender { tx, policy }, JoinReceiver { rx })
}

/// Producer side of the join queue.
#[derive(Clone)]
pub struct JoinSender {
    tx: mpsc::Sender<Jid>,
    policy: OverflowPolicy,
}

impl JoinSender {
    /// Enqueue a candidate address.
    ///
    /// Under [`OverflowPolicy::DropNewest`] this never suspends; under
    /// [`OverflowPolicy::Backpressure`] it suspends at most the
    /// configured timeout.
    pub async fn enqueue(&self, address: Jid) -> EnqueueOutcome {
        match self.policy {
            OverflowPolicy::DropNewest => match self.tx.try_send(address) {
                Ok(()) => EnqueueOutcome::Accepted,
                Err(mpsc::error::TrySendError::Full(address)) => {
                    warn!(%address, "join queue full, dropping join event");
                    EnqueueOutcome::Dropped
                }
                Err(mpsc::error::TrySendError::Closed(_)) => EnqueueOutcome::Closed,
            },
            OverflowPolicy::Backpressure { timeout } => {
                match tokio::time::timeout(timeout, self.tx.send(address)).await {
                    Ok(Ok(())) => EnqueueOutcome::Accepted,
                    Ok(Err(_)) => EnqueueOutcome::Closed,
                    Err(_elapsed) => {
                        warn!(
                            timeout_ms = timeout.as_millis() as u64,
                            "join queue full past backpressure timeout, dropping join event"
                        );
                        EnqueueOutcome::Dropped
                    }
                }
            }
        }
    }
}

/// Consumer side of the join queue.
pub struct JoinReceiver {
    rx: mpsc::Receiver<Jid>,
}

impl JoinReceiver {
    /// Wait for the next queued address, in FIFO order.
    ///
    /// Returns `None` once the producer side is gone and the queue is
    /// drained.
    pub async fn dequeue(&mut self) -> Option<Jid> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Jid {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn fifo_order_is_preserved() {
        let (tx, mut rx) = join_queue(8, OverflowPolicy::DropNewest);
        for s in ["a@x.example", "b@x.example", "c@x.example"] {
            assert_eq!(tx.enqueue(addr(s)).await, EnqueueOutcome::Accepted);
        }
        assert_eq!(rx.dequeue().await, Some(addr("a@x.example")));
        assert_eq!(rx.dequeue().await, Some(addr("b@x.example")));
        assert_eq!(rx.dequeue().await, Some(addr("c@x.example")));
    }

    #[tokio::test]
    async fn drop_newest_sheds_overflow_without_suspending() {
        let (tx, mut rx) = join_queue(1, OverflowPolicy::DropNewest);
        assert_eq!(tx.enqueue(addr("a@x.example")).await, EnqueueOutcome::Accepted);
        assert_eq!(tx.enqueue(addr("b@x.example")).await, EnqueueOutcome::Dropped);
        // The accepted item is intact.
        assert_eq!(rx.dequeue().await, Some(addr("a@x.example")));
    }

    #[tokio::test]
    async fn backpressure_gives_up_after_timeout() {
        let policy = OverflowPolicy::Backpressure {
            timeout: Duration::from_millis(10),
        };
        let (tx, mut rx) = join_queue(1, policy);
        assert_eq!(tx.enqueue(addr("a@x.example")).await, EnqueueOutcome::Accepted);
        assert_eq!(tx.enqueue(addr("b@x.example")).await, EnqueueOutcome::Dropped);
        assert_eq!(rx.dequeue().await, Some(addr("a@x.example")));
    }

    #[tokio::test]
    async fn backpressure_succeeds_when_consumer_drains_in_time() {
        let policy = OverflowPolicy::Backpressure {
            timeout: Duration::from_secs(1),
        };
        let (tx, mut rx) = join_queue(1, policy);
        assert_eq!(tx.enqueue(addr("a@x.example")).await, EnqueueOutcome::Accepted);

        let producer = tokio::spawn(async move { tx.enqueue(addr("b@x.example")).await });
        assert_eq!(rx.dequeue().await, Some(addr("a@x.example")));
        assert_eq!(producer.await.unwrap(), EnqueueOutcome::Accepted);
        assert_eq!(rx.dequeue().await, Some(addr("b@x.example")));
    }

    #[tokio::test]
    async fn closed_queue_reports_closed() {
        let (tx, rx) = join_queue(1, OverflowPolicy::DropNewest);
        drop(rx);
        assert_eq!(tx.enqueue(addr("a@x.example")).await, EnqueueOutcome::Closed);
    }

    #[tokio::test]
    async fn dequeue_ends_when_producer_is_gone() {
        let (tx, mut rx) = join_queue(1, OverflowPolicy::DropNewest);
        tx.enqueue(addr("a@x.example")).await;
        drop(tx);
        assert_eq!(rx.dequeue().await, Some(addr("a@x.example")));
        assert_eq!(rx.dequeue().await, None);
    }
}
