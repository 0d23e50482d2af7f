//! Validated configuration structures

use crate::schema::{RawConfig, RawEvent, RawServiceConfig};
use crate::validation::parse_end_date;
use chrono::{DateTime, Utc};
use eventstatus_util::{socket_path_without_env, GroupId};
use std::path::PathBuf;

/// Validated configuration ready for use by the service
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub service: ServiceConfig,

    /// Last known event per group, in file order
    pub events: Vec<CatalogEvent>,
}

impl Catalog {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let service = ServiceConfig::from_raw(raw.service);
        let default_hours = service.default_review_duration_hours;

        let events = raw
            .events
            .into_iter()
            .filter_map(|e| CatalogEvent::from_raw(e, default_hours))
            .collect();

        Self { service, events }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub socket_path: PathBuf,

    /// Review duration for events that don't set one. Zero when unset.
    pub default_review_duration_hours: f64,
}

impl ServiceConfig {
    fn from_raw(raw: RawServiceConfig) -> Self {
        Self {
            socket_path: raw.socket_path.unwrap_or_else(socket_path_without_env),
            default_review_duration_hours: raw.default_review_duration_hours.unwrap_or(0.0),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_raw(RawServiceConfig::default())
    }
}

/// A group's last event
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEvent {
    pub group_id: GroupId,
    pub end_date: DateTime<Utc>,
    pub review_duration_hours: f64,
}

impl CatalogEvent {
    fn from_raw(raw: RawEvent, default_hours: f64) -> Option<Self> {
        let end_date = parse_end_date(&raw.end_date).ok()?;
        Some(Self {
            group_id: GroupId::new(raw.group_id),
            end_date,
            review_duration_hours: raw.review_duration_hours.unwrap_or(default_hours),
        })
    }
}
