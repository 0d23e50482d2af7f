//! Event lookup contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventstatus_util::GroupId;
use thiserror::Error;

/// The last event recorded for a group
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub end_date: DateTime<Utc>,
    /// Length of the review window after `end_date`
    pub review_duration_hours: f64,
}

impl EventRecord {
    pub fn new(end_date: DateTime<Utc>, review_duration_hours: f64) -> Self {
        Self {
            end_date,
            review_duration_hours,
        }
    }
}

/// Errors from an event source
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Event source unavailable: {0}")]
    Unavailable(String),
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Source of the last event per group
///
/// `Ok(None)` means the group never had an event. That is a valid answer,
/// not an error.
#[async_trait]
pub trait LoadLastEvent: Send + Sync {
    async fn load_last_event(&self, group_id: &GroupId) -> LookupResult<Option<EventRecord>>;
}
