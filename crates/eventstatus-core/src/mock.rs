//! Scripted event lookup for testing

use async_trait::async_trait;
use eventstatus_util::GroupId;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{EventRecord, LoadLastEvent, LookupError, LookupResult};

/// Lookup double that records its calls and returns a scripted answer
#[derive(Debug, Default)]
pub struct ScriptedLookup {
    calls: AtomicUsize,
    last_group_id: Mutex<Option<GroupId>>,
    output: Mutex<Option<EventRecord>>,
    failure: Mutex<Option<String>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(self, record: EventRecord) -> Self {
        self.set_output(Some(record));
        self
    }

    /// Record returned by subsequent lookups; `None` means "no event"
    pub fn set_output(&self, record: Option<EventRecord>) {
        *self.output.lock().unwrap() = record;
    }

    /// Make subsequent lookups fail with `LookupError::Unavailable`
    pub fn set_failure(&self, message: Option<String>) {
        *self.failure.lock().unwrap() = message;
    }

    pub fn calls_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_group_id(&self) -> Option<GroupId> {
        self.last_group_id.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoadLastEvent for ScriptedLookup {
    async fn load_last_event(&self, group_id: &GroupId) -> LookupResult<Option<EventRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_group_id.lock().unwrap() = Some(group_id.clone());

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(LookupError::Unavailable(message));
        }

        Ok(self.output.lock().unwrap().clone())
    }
}
