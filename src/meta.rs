use std::time::SystemTime;

use uuid::Uuid;

use crate::{EventId, EventName};

/// Metadata attached to every envelope.
///
/// - `id`: unique identifier for the envelope.
/// - `name`: the event name this payload was fired under.
/// - `timestamp`: creation time in nanoseconds since Unix epoch
///   (truncated to `u64`).
///
/// The timestamp marks when the fire request was made, not when the
/// delivery completed; a throttled fire keeps its original timestamp
/// through the wait.
#[derive(Debug, Clone)]
pub struct Meta {
    id: EventId,
    name: EventName,
    timestamp: u64,
}

impl Meta {
    /// Construct metadata for a given event name.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set before the Unix epoch.
    pub fn new(name: EventName) -> Self {
        Self {
            id: Uuid::new_v4().as_u128(),
            name,
            timestamp: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .expect("SystemTime before Unix epoch")
                .as_nanos() as u64,
        }
    }

    /// Unique identifier for this envelope.
    pub fn id(&self) -> EventId {
        self.id
    }

    /// The event name that routed this payload.
    pub fn name(&self) -> &EventName {
        &self.name
    }

    /// Timestamp in nanoseconds since Unix epoch (u64 truncation).
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
