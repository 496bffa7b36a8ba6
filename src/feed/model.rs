use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two sampled event streams shown on the dashboard.
///
/// Stats and anomalies are standalone feeds; only the event streams share a
/// request shape (base URL plus an `index` query parameter) and a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFeed {
    Tasks,
    CompletedTasks,
}

impl EventFeed {
    /// Feed name as it appears in logs and upstream naming.
    pub const fn label(&self) -> &'static str {
        match self {
            EventFeed::Tasks => "tasks",
            EventFeed::CompletedTasks => "completedTasks",
        }
    }

    /// Identifier of the display region this feed owns.
    pub const fn region_id(&self) -> &'static str {
        match self {
            EventFeed::Tasks => "event-tasks",
            EventFeed::CompletedTasks => "event-completedTasks",
        }
    }

    pub const fn section_title(&self) -> &'static str {
        match self {
            EventFeed::Tasks => "Latest Task Event",
            EventFeed::CompletedTasks => "Latest Completed Task Event",
        }
    }
}

/// Query string for event-feed requests: `?index=<0..100>`.
#[derive(Debug, Serialize)]
pub struct EventQuery {
    pub index: u8,
}

/// One entry of the anomaly feed, rendered as its own block in received
/// order. `timestamp` stays untyped because upstream emits either epoch
/// milliseconds or an RFC 3339 string.
#[derive(Debug, Clone, Deserialize)]
pub struct AnomalyRecord {
    #[serde(rename = "eventId", default)]
    pub event_id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub timestamp: Value,
}
