//! Lookup over the configured event catalog

use async_trait::async_trait;
use eventstatus_config::Catalog;
use eventstatus_util::GroupId;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{info, warn};

use crate::{EventRecord, LoadLastEvent, LookupResult};

/// In-memory view of the catalog's events, keyed by group
///
/// Read-mostly: every check takes a read lock, a config reload swaps the
/// whole map under a write lock.
#[derive(Debug, Default)]
pub struct CatalogLookup {
    events: RwLock<HashMap<GroupId, EventRecord>>,
}

impl CatalogLookup {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let lookup = Self::default();
        lookup.replace(catalog);
        lookup
    }

    /// Replace all known events with the catalog's. Returns the group count.
    pub fn replace(&self, catalog: &Catalog) -> usize {
        let mut events = HashMap::with_capacity(catalog.events.len());
        for event in &catalog.events {
            let record = EventRecord::new(event.end_date, event.review_duration_hours);
            if events.insert(event.group_id.clone(), record).is_some() {
                warn!(group_id = %event.group_id, "Duplicate group in catalog, keeping the last one");
            }
        }

        let count = events.len();
        *self.events.write().unwrap() = events;

        info!(group_count = count, "Event catalog loaded");
        count
    }

    pub fn group_count(&self) -> usize {
        self.events.read().unwrap().len()
    }
}

#[async_trait]
impl LoadLastEvent for CatalogLookup {
    async fn load_last_event(&self, group_id: &GroupId) -> LookupResult<Option<EventRecord>> {
        Ok(self.events.read().unwrap().get(group_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use eventstatus_config::parse_config;

    fn catalog(toml: &str) -> Catalog {
        parse_config(toml).unwrap()
    }

    #[tokio::test]
    async fn finds_configured_event() {
        let lookup = CatalogLookup::from_catalog(&catalog(
            r#"
            config_version = 1

            [[events]]
            group_id = "retro"
            end_date = "2025-06-01T12:00:00Z"
            review_duration_hours = 2
            "#,
        ));

        let record = lookup
            .load_last_event(&GroupId::new("retro"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.end_date, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        assert_eq!(record.review_duration_hours, 2.0);
    }

    #[tokio::test]
    async fn unknown_group_is_none() {
        let lookup = CatalogLookup::from_catalog(&catalog("config_version = 1"));
        let record = lookup.load_last_event(&GroupId::new("retro")).await.unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn replace_swaps_all_events() {
        let lookup = CatalogLookup::from_catalog(&catalog(
            r#"
            config_version = 1

            [[events]]
            group_id = "old"
            end_date = "2025-06-01T12:00:00Z"
            "#,
        ));
        assert_eq!(lookup.group_count(), 1);

        let count = lookup.replace(&catalog(
            r#"
            config_version = 1

            [[events]]
            group_id = "new-a"
            end_date = "2025-06-01T12:00:00Z"

            [[events]]
            group_id = "new-b"
            end_date = "2025-06-02T12:00:00Z"
            "#,
        ));

        assert_eq!(count, 2);
        assert!(lookup.load_last_event(&GroupId::new("old")).await.unwrap().is_none());
        assert!(lookup.load_last_event(&GroupId::new("new-b")).await.unwrap().is_some());
    }
}
