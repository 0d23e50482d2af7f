//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Service-level settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Last known event per group
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// IPC socket path
    pub socket_path: Option<PathBuf>,

    /// Review duration used by events that don't set their own
    pub default_review_duration_hours: Option<f64>,
}

/// Raw event definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawEvent {
    /// Group the event belongs to
    pub group_id: String,

    /// End of the event, RFC 3339 (e.g. "2025-06-01T12:00:00Z")
    pub end_date: String,

    /// Length of the review window after `end_date`, in hours
    pub review_duration_hours: Option<f64>,
}
