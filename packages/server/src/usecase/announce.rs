//! Rendering of notices into events and handing them to the dispatcher.

use std::sync::Arc;

use crate::domain::{Event, Notice, Renderer, TimerState};

use super::dispatch::EventDispatcher;

/// Renders the regions named by [`Notice`]s and enqueues the resulting events.
#[derive(Clone)]
pub struct Announcer {
    renderer: Arc<dyn Renderer>,
    dispatcher: EventDispatcher,
}

impl Announcer {
    pub fn new(renderer: Arc<dyn Renderer>, dispatcher: EventDispatcher) -> Self {
        Self {
            renderer,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Render one event per notice, in order.
    pub fn render(&self, state: &TimerState, notices: &[Notice]) -> Vec<Event> {
        notices
            .iter()
            .map(|notice| Event::new(notice.topic, self.renderer.render(notice.region, state)))
            .collect()
    }

    /// Render and enqueue. Returns the number of events published.
    pub fn announce(&self, state: &TimerState, notices: &[Notice]) -> usize {
        let events = self.render(state, notices);
        let count = events.len();
        for event in events {
            self.dispatcher.publish(event);
        }
        count
    }
}
