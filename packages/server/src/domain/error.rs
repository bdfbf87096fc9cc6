//! Domain error types.

use thiserror::Error;

/// An operation was invoked in a state where it is not valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// There is no current session.
    #[error("no session is in progress")]
    NoActiveSession,

    /// The current session is a break.
    #[error("a break is in progress")]
    BreakInProgress,
}

/// A subscriber's queue did not accept an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The bounded queue is full; the subscriber is not keeping up.
    #[error("subscriber queue is full")]
    QueueFull,

    /// The receiving side has been dropped.
    #[error("subscriber queue is closed")]
    Closed,
}
