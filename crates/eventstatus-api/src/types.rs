//! Shared value types for the eventstatus API

use chrono::{DateTime, Utc};
use eventstatus_util::{ClientId, GroupId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a group's last event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// The event has not ended yet (or ends exactly now)
    Active,
    /// The event ended but its review window is still open
    Pendent,
    /// The review window closed, or the group never had an event
    Done,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "active",
            EventStatus::Pendent => "pendent",
            EventStatus::Done => "done",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a status check as reported to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub group_id: GroupId,
    pub status: EventStatus,
    /// Instant the status was evaluated at
    pub checked_at: DateTime<Utc>,
}

/// Client role for authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientRole {
    /// Any local peer: can ping, check status, read health
    Reader,
    /// Root or the service's own user: can also reload config
    Admin,
}

impl ClientRole {
    pub fn can_reload_config(&self) -> bool {
        matches!(self, ClientRole::Admin)
    }
}

/// Client connection info (set by IPC layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub client_id: ClientId,
    pub role: ClientRole,
    /// Unix UID if available
    pub uid: Option<u32>,
}

impl ClientInfo {
    pub fn new(role: ClientRole) -> Self {
        Self {
            client_id: ClientId::new(),
            role,
            uid: None,
        }
    }

    pub fn with_uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }
}

/// Health status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub live: bool,
    pub ready: bool,
    /// Number of groups with a known event
    pub group_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&EventStatus::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&EventStatus::Pendent).unwrap(), "\"pendent\"");
        assert_eq!(serde_json::to_string(&EventStatus::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn status_display_matches_wire_name() {
        for status in [EventStatus::Active, EventStatus::Pendent, EventStatus::Done] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.to_string());
        }
    }

    #[test]
    fn only_admin_reloads() {
        assert!(ClientRole::Admin.can_reload_config());
        assert!(!ClientRole::Reader.can_reload_config());
    }
}
