//! Content change notifications
//!
//! Admin handlers publish a [`ContentEvent`] after every successful
//! mutation. The bus uses `tokio::sync::broadcast`, so publishing never
//! blocks and events are dropped when nobody listens.
//!
//! ```rust,ignore
//! let bus = EventBus::new(256);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ContentEvent::Deleted { resource: "tours".into(), id: 7 });
//!
//! let envelope = rx.recv().await?;
//! assert_eq!(envelope.event.action(), "deleted");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// A mutation of one content collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ContentEvent {
    Created {
        resource: String,
        id: u64,
        data: serde_json::Value,
    },
    Updated {
        resource: String,
        id: u64,
        data: serde_json::Value,
    },
    Deleted {
        resource: String,
        id: u64,
    },
    /// Records of a collection were re-sequenced
    Reordered { resource: String, ids: Vec<u64> },
}

impl ContentEvent {
    /// The resource this event relates to
    pub fn resource(&self) -> &str {
        match self {
            ContentEvent::Created { resource, .. }
            | ContentEvent::Updated { resource, .. }
            | ContentEvent::Deleted { resource, .. }
            | ContentEvent::Reordered { resource, .. } => resource,
        }
    }

    /// The record id, for single-record events
    pub fn id(&self) -> Option<u64> {
        match self {
            ContentEvent::Created { id, .. }
            | ContentEvent::Updated { id, .. }
            | ContentEvent::Deleted { id, .. } => Some(*id),
            ContentEvent::Reordered { .. } => None,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ContentEvent::Created { .. } => "created",
            ContentEvent::Updated { .. } => "updated",
            ContentEvent::Deleted { .. } => "deleted",
            ContentEvent::Reordered { .. } => "reordered",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: ContentEvent,
}

impl EventEnvelope {
    pub fn new(event: ContentEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone and safe to share across handlers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per slow receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of receivers that will receive the event.
    pub fn publish(&self, event: ContentEvent) -> usize {
        tracing::debug!(
            resource = event.resource(),
            id = ?event.id(),
            action = event.action(),
            "content changed"
        );
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers, which is fine
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
