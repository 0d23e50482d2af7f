//! Command types for the eventstatusd protocol

use eventstatus_util::{EventStatusError, GroupId};
use serde::{Deserialize, Serialize};

use crate::{HealthStatus, StatusView, API_VERSION};

/// Greeting returned for `Command::Ping`
pub const PING_MESSAGE: &str = "Hello World";

/// Request wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Request ID for correlation
    pub request_id: u64,
    /// API version
    pub api_version: u32,
    /// The command
    pub command: Command,
}

impl Request {
    pub fn new(request_id: u64, command: Command) -> Self {
        Self {
            request_id,
            api_version: API_VERSION,
            command,
        }
    }
}

/// Response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Corresponding request ID
    pub request_id: u64,
    /// API version
    pub api_version: u32,
    /// Response payload or error
    pub result: ResponseResult,
}

impl Response {
    pub fn success(request_id: u64, payload: ResponsePayload) -> Self {
        Self {
            request_id,
            api_version: API_VERSION,
            result: ResponseResult::Ok(payload),
        }
    }

    pub fn error(request_id: u64, error: ErrorInfo) -> Self {
        Self {
            request_id,
            api_version: API_VERSION,
            result: ResponseResult::Err(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseResult {
    Ok(ResponsePayload),
    Err(ErrorInfo),
}

/// Error information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&EventStatusError> for ErrorInfo {
    fn from(err: &EventStatusError) -> Self {
        let code = match err {
            EventStatusError::ConfigError(_) => ErrorCode::ConfigError,
            EventStatusError::LookupError(_) => ErrorCode::LookupFailed,
            EventStatusError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            EventStatusError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            EventStatusError::RateLimited => ErrorCode::RateLimited,
        };
        ErrorInfo::new(code, err.to_string())
    }
}

/// Error codes for the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    LookupFailed,
    PermissionDenied,
    RateLimited,
    ConfigError,
}

/// All possible commands from clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Liveness greeting
    Ping,

    /// Compute the status of the group's last event
    CheckStatus { group_id: GroupId },

    /// Get health status
    GetHealth,

    /// Reload configuration (admin only)
    ReloadConfig,
}

/// Response payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePayload {
    Pong { message: String },
    Status(StatusView),
    Health(HealthStatus),
    ConfigReloaded { group_count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventStatus;
    use chrono::{TimeZone, Utc};

    #[test]
    fn check_status_wire_format() {
        let req = Request::new(7, Command::CheckStatus {
            group_id: GroupId::new("any_group_id"),
        });
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["request_id"], 7);
        assert_eq!(json["api_version"], API_VERSION);
        assert_eq!(json["command"]["type"], "check_status");
        assert_eq!(json["command"]["group_id"], "any_group_id");
    }

    #[test]
    fn status_response_wire_format() {
        let resp = Response::success(
            7,
            ResponsePayload::Status(StatusView {
                group_id: GroupId::new("any_group_id"),
                status: EventStatus::Pendent,
                checked_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            }),
        );
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["result"]["ok"]["type"], "status");
        assert_eq!(json["result"]["ok"]["status"], "pendent");

        let parsed: Response = serde_json::from_value(json).unwrap();
        assert!(matches!(
            parsed.result,
            ResponseResult::Ok(ResponsePayload::Status(view)) if view.status == EventStatus::Pendent
        ));
    }

    #[test]
    fn parse_ping_from_client_line() {
        let line = r#"{"request_id":1,"api_version":1,"command":{"type":"ping"}}"#;
        let req: Request = serde_json::from_str(line).unwrap();
        assert!(matches!(req.command, Command::Ping));
    }

    #[test]
    fn error_info_from_service_error() {
        let info = ErrorInfo::from(&EventStatusError::lookup("backend unreachable"));
        assert_eq!(info.code, ErrorCode::LookupFailed);
        assert!(info.message.contains("backend unreachable"));

        let info = ErrorInfo::from(&EventStatusError::RateLimited);
        assert_eq!(info.code, ErrorCode::RateLimited);
    }
}
