//! Time utilities for eventstatus
//!
//! All timestamps are UTC; timezone handling is out of scope.
//!
//! Status evaluation never reads the system clock directly. It asks a
//! [`Clock`] for the current instant, so tests can freeze time with
//! [`FixedClock`] and the service can use [`SystemClock`].
//!
//! # Mock Time for Development
//!
//! In debug builds, the `EVENTSTATUS_MOCK_TIME` environment variable can be set
//! to override the system time seen by [`now`] (and therefore by
//! [`SystemClock`]). This is useful for poking at status boundaries by hand.
//!
//! Format: `YYYY-MM-DD HH:MM:SS`, interpreted as UTC (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! EVENTSTATUS_MOCK_TIME="2025-12-25 14:30:00" eventstatusd
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use std::sync::{OnceLock, RwLock};

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "EVENTSTATUS_MOCK_TIME";

/// Expected format of [`MOCK_TIME_ENV_VAR`]
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Utc::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match parse_mock_time(&mock_time_str) {
                    Some(mock_dt) => {
                        let offset = mock_dt.signed_duration_since(Utc::now());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    None => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = MOCK_TIME_FORMAT,
                            "Invalid mock time format"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Parse a mock time string as a UTC instant.
pub fn parse_mock_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, MOCK_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current UTC time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Utc> {
    let real_now = Utc::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Format a timestamp as RFC 3339 with millisecond precision.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Read the current instant. Callers that compare against several
    /// thresholds must read once and reuse the value.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        now()
    }
}

/// Clock frozen at a settable instant
#[derive(Debug)]
pub struct FixedClock {
    instant: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: RwLock::new(instant),
        }
    }

    /// Freeze the clock at the current (possibly mocked) wall time
    pub fn frozen_now() -> Self {
        Self::new(now())
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.write().unwrap() = instant;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut instant = self.instant.write().unwrap();
        *instant += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.read().unwrap()
    }
}
