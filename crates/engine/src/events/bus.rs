//! Two-topic broadcast bus.
//!
//! Allows consumers to subscribe to specific topics and only receive
//! events they care about. Publishing is best-effort: a topic without
//! subscribers simply drops the event.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::MapEvent;
use crate::log::LogEntry;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Command lifecycle entries (the command log, as they happen).
    Lifecycle,
    /// Map-surface activity (clears, movement animations).
    Map,
}

/// Event wrapper that carries the topic and typed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Lifecycle(LogEntry),
    Map(MapEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Lifecycle(_) => Topic::Lifecycle,
            Event::Map(_) => Topic::Map,
        }
    }
}

/// Fixed-topic broadcast bus shared by the worker and its clients.
#[derive(Clone)]
pub struct EventBus {
    lifecycle: broadcast::Sender<Event>,
    map: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lifecycle: broadcast::channel(capacity).0,
            map: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Lifecycle => &self.lifecycle,
            Topic::Map => &self.map,
        }
    }

    /// Publish an event to its corresponding topic.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("no subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
