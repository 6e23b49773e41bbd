//! Audit Event - raw input record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single security/audit log event (login attempt, access event, ...)
///
/// Field names follow the ingest wire shape (`eventType`, `userId`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_type: String,
    pub user_id: String,
    pub ip: String,
    pub location: String,
    /// ISO-8601 timestamp; missing or unparsable values fall back to the clock
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl Event {
    pub fn new(
        event_type: impl Into<String>,
        user_id: impl Into<String>,
        ip: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            user_id: user_id.into(),
            ip: ip.into(),
            location: location.into(),
            timestamp: None,
            metadata: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
