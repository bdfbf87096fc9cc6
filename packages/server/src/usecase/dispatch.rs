//! Outbound event queue drained by the hub's own task.
//!
//! State mutations enqueue their rendered events here and return immediately.
//! A single task applies the queued commands to the [`EventHub`] in order, so
//! per-subscriber ordering matches mutation order and no mutation waits on a
//! fan-out.

use std::sync::Arc;

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{Event, EventHub, Subscriber, SubscriberId};

enum HubCommand {
    Publish(Event),
    /// Push `snapshot` into the subscriber's queue, then add it to the hub.
    Attach {
        subscriber: Subscriber,
        snapshot: Vec<Event>,
    },
    Detach(SubscriberId),
    /// Answered once every earlier command has been applied.
    Flush(oneshot::Sender<()>),
}

/// Handle for enqueueing hub commands. Cheap to clone.
#[derive(Clone)]
pub struct EventDispatcher {
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl EventDispatcher {
    /// Start the draining task. Must be called from within a tokio runtime.
    pub fn spawn(hub: Arc<dyn EventHub>) -> (Self, JoinHandle<()>) {
        let (commands, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(drain(hub, receiver));
        (Self { commands }, handle)
    }

    pub fn publish(&self, event: Event) {
        self.send(HubCommand::Publish(event));
    }

    pub fn attach(&self, subscriber: Subscriber, snapshot: Vec<Event>) {
        self.send(HubCommand::Attach {
            subscriber,
            snapshot,
        });
    }

    pub fn detach(&self, id: SubscriberId) {
        self.send(HubCommand::Detach(id));
    }

    /// Wait until everything enqueued so far has reached the hub.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        self.send(HubCommand::Flush(done));
        let _ = wait.await;
    }

    fn send(&self, command: HubCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Hub dispatcher has stopped; dropping command");
        }
    }
}

async fn drain(hub: Arc<dyn EventHub>, mut commands: mpsc::UnboundedReceiver<HubCommand>) {
    while let Some(command) = commands.recv().await {
        match command {
            HubCommand::Publish(event) => {
                let report = hub.publish(&event).await;
                tracing::debug!(
                    "Published '{}' to {} subscriber(s), evicted {}",
                    event.topic,
                    report.delivered,
                    report.evicted
                );
            }
            HubCommand::Attach {
                subscriber,
                snapshot,
            } => {
                let id = subscriber.id();
                let replayed = snapshot
                    .into_iter()
                    .try_for_each(|event| subscriber.try_push(event));
                match replayed {
                    Ok(()) => hub.register(subscriber).await,
                    Err(e) => {
                        tracing::warn!("Dropping subscriber '{}' during snapshot: {}", id, e)
                    }
                }
            }
            HubCommand::Detach(id) => {
                hub.unregister(&id).await;
            }
            HubCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    tracing::info!("Hub dispatcher stopped");
}
