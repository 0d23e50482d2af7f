//! Configuration validation

use crate::schema::{RawConfig, RawEvent};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Event #{index}: group_id cannot be empty")]
    EmptyGroupId { index: usize },

    #[error("Duplicate group ID: {0}")]
    DuplicateGroupId(String),

    #[error("Event '{group_id}': invalid end_date '{value}': {message}")]
    InvalidEndDate {
        group_id: String,
        value: String,
        message: String,
    },

    #[error("Event '{group_id}': review_duration_hours must be a finite, non-negative number (got {value})")]
    InvalidReviewDuration { group_id: String, value: f64 },

    #[error("Global config error: {0}")]
    GlobalError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(hours) = config.service.default_review_duration_hours
        && !is_valid_review_duration(hours)
    {
        errors.push(ValidationError::GlobalError(format!(
            "default_review_duration_hours must be a finite, non-negative number (got {})",
            hours
        )));
    }

    let mut seen_ids = HashSet::new();
    for event in &config.events {
        if !event.group_id.is_empty() && !seen_ids.insert(&event.group_id) {
            errors.push(ValidationError::DuplicateGroupId(event.group_id.clone()));
        }
    }

    for (index, event) in config.events.iter().enumerate() {
        errors.extend(validate_event(index, event));
    }

    errors
}

fn validate_event(index: usize, event: &RawEvent) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if event.group_id.is_empty() {
        errors.push(ValidationError::EmptyGroupId { index });
    }

    if let Err(e) = parse_end_date(&event.end_date) {
        errors.push(ValidationError::InvalidEndDate {
            group_id: event.group_id.clone(),
            value: event.end_date.clone(),
            message: e,
        });
    }

    if let Some(hours) = event.review_duration_hours
        && !is_valid_review_duration(hours)
    {
        errors.push(ValidationError::InvalidReviewDuration {
            group_id: event.group_id.clone(),
            value: hours,
        });
    }

    errors
}

/// Parse an RFC 3339 timestamp and normalize it to UTC
pub fn parse_end_date(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 timestamp ({})", e))
}

pub fn is_valid_review_duration(hours: f64) -> bool {
    hours.is_finite() && hours >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawServiceConfig;
    use chrono::TimeZone;

    fn event(group_id: &str, end_date: &str, hours: Option<f64>) -> RawEvent {
        RawEvent {
            group_id: group_id.into(),
            end_date: end_date.into(),
            review_duration_hours: hours,
        }
    }

    fn config(events: Vec<RawEvent>) -> RawConfig {
        RawConfig {
            config_version: 1,
            service: RawServiceConfig::default(),
            events,
        }
    }

    #[test]
    fn test_parse_end_date() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_end_date("2025-06-01T10:00:00Z").unwrap(), utc);
        assert_eq!(parse_end_date("2025-06-01T12:00:00+02:00").unwrap(), utc);

        assert!(parse_end_date("2025-06-01").is_err());
        assert!(parse_end_date("2025-06-01 10:00:00").is_err());
        assert!(parse_end_date("").is_err());
    }

    #[test]
    fn test_review_duration_domain() {
        assert!(is_valid_review_duration(0.0));
        assert!(is_valid_review_duration(1.5));
        assert!(!is_valid_review_duration(-0.1));
        assert!(!is_valid_review_duration(f64::NAN));
        assert!(!is_valid_review_duration(f64::INFINITY));
    }

    #[test]
    fn test_duplicate_id_detection() {
        let raw = config(vec![
            event("retro", "2025-06-01T10:00:00Z", Some(1.0)),
            event("retro", "2025-06-02T10:00:00Z", Some(1.0)),
        ]);

        let errors = validate_config(&raw);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateGroupId(id) if id == "retro")));
    }

    #[test]
    fn test_empty_group_id() {
        let raw = config(vec![
            event("", "2025-06-01T10:00:00Z", None),
            event("", "2025-06-01T10:00:00Z", None),
        ]);

        let errors = validate_config(&raw);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, ValidationError::EmptyGroupId { .. })));
    }

    #[test]
    fn test_invalid_default_duration() {
        let mut raw = config(vec![]);
        raw.service.default_review_duration_hours = Some(-1.0);

        let errors = validate_config(&raw);
        assert!(matches!(errors.as_slice(), [ValidationError::GlobalError(_)]));
    }

    #[test]
    fn test_valid_config_has_no_errors() {
        let raw = config(vec![
            event("design-review", "2025-06-01T10:00:00Z", Some(48.0)),
            event("retro", "2025-06-02T10:00:00Z", None),
        ]);

        assert!(validate_config(&raw).is_empty());
    }
}
