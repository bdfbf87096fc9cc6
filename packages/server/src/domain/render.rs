//! Rendering collaborator interface.

use super::{Region, TimerState};

/// Turns a region of the timer state into the payload pushed to subscribers.
///
/// Called while the state is locked, so implementations must not block.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    fn render(&self, region: Region, state: &TimerState) -> String;
}
