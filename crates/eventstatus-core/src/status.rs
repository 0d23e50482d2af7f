//! The status rule

use chrono::{DateTime, TimeDelta, Utc};

use crate::{EventRecord, EventStatus};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Convert a review duration in hours to a time span.
///
/// Hours are converted to whole milliseconds, truncating toward zero.
/// Negative and NaN durations count as zero. Returns `None` when the span
/// is too large to represent, meaning the review window never closes.
pub fn review_window(hours: f64) -> Option<TimeDelta> {
    if hours.is_nan() || hours <= 0.0 {
        return Some(TimeDelta::zero());
    }

    let millis = (hours * MILLIS_PER_HOUR).trunc();
    if millis >= i64::MAX as f64 {
        return None;
    }

    TimeDelta::try_milliseconds(millis as i64)
}

impl EventRecord {
    /// Last instant of the review window, `None` if unbounded
    pub fn review_deadline(&self) -> Option<DateTime<Utc>> {
        review_window(self.review_duration_hours)
            .and_then(|window| self.end_date.checked_add_signed(window))
    }
}

/// Status of a group's last event at `now`.
///
/// Both boundaries are inclusive: at exactly `end_date` the event is still
/// active, at exactly the review deadline it is still pendent.
pub fn evaluate_status(event: Option<&EventRecord>, now: DateTime<Utc>) -> EventStatus {
    let Some(event) = event else {
        return EventStatus::Done;
    };

    if now <= event.end_date {
        return EventStatus::Active;
    }

    match event.review_deadline() {
        Some(deadline) if now > deadline => EventStatus::Done,
        _ => EventStatus::Pendent,
    }
}
