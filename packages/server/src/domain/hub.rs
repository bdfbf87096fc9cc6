//! Subscriber handles and the broadcast hub abstraction.
//!
//! The hub only holds the sending half of each subscriber's queue. The
//! connection that owns the receiving half decides how events reach the
//! network.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use super::{DeliveryError, Event};

/// Identifies one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sending half of a subscriber's bounded queue.
#[derive(Debug, Clone)]
pub struct Subscriber {
    id: SubscriberId,
    queue: mpsc::Sender<Event>,
}

impl Subscriber {
    /// Allocate a queue of `capacity` events and return both halves.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (queue, receiver) = mpsc::channel(capacity.max(1));
        let subscriber = Self {
            id: SubscriberId::generate(),
            queue,
        };
        (subscriber, receiver)
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Enqueue without waiting.
    pub fn try_push(&self, event: Event) -> Result<(), DeliveryError> {
        self.queue.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::QueueFull,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}

/// Outcome of one fan-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    pub evicted: usize,
}

/// Registry of live subscribers.
///
/// `publish` never waits on a subscriber. A subscriber whose queue rejects an
/// event is removed, which drops the hub's sender and closes its stream.
#[async_trait]
pub trait EventHub: Send + Sync {
    /// Add a subscriber to the fan-out set.
    async fn register(&self, subscriber: Subscriber);

    /// Remove a subscriber. Returns `false` if it was not registered.
    async fn unregister(&self, id: &SubscriberId) -> bool;

    /// Deliver `event` to every registered subscriber.
    async fn publish(&self, event: &Event) -> PublishReport;

    async fn subscriber_count(&self) -> usize;
}
