//! The check operation

use eventstatus_api::{EventStatus, StatusView};
use eventstatus_util::{Clock, GroupId, SystemClock};
use std::sync::Arc;
use tracing::debug;

use crate::{evaluate_status, LoadLastEvent, LookupResult};

/// Looks up a group's last event and evaluates its status
///
/// Each check performs exactly one lookup and reads the clock exactly once,
/// after the lookup returns. Lookup errors are returned as-is.
#[derive(Clone)]
pub struct CheckLastEventStatus {
    lookup: Arc<dyn LoadLastEvent>,
    clock: Arc<dyn Clock>,
}

impl CheckLastEventStatus {
    pub fn new(lookup: Arc<dyn LoadLastEvent>, clock: Arc<dyn Clock>) -> Self {
        Self { lookup, clock }
    }

    /// Checker reading the system clock
    pub fn with_system_clock(lookup: Arc<dyn LoadLastEvent>) -> Self {
        Self::new(lookup, Arc::new(SystemClock))
    }

    pub async fn execute(&self, group_id: &GroupId) -> LookupResult<EventStatus> {
        self.inspect(group_id).await.map(|view| view.status)
    }

    /// Like [`CheckLastEventStatus::execute`], also reporting the evaluation instant
    pub async fn inspect(&self, group_id: &GroupId) -> LookupResult<StatusView> {
        let event = self.lookup.load_last_event(group_id).await?;
        let now = self.clock.now();
        let status = evaluate_status(event.as_ref(), now);

        debug!(
            group_id = %group_id,
            has_event = event.is_some(),
            end_date = ?event.as_ref().map(|e| e.end_date),
            status = %status,
            "Status evaluated"
        );

        Ok(StatusView {
            group_id: group_id.clone(),
            status,
            checked_at: now,
        })
    }
}
