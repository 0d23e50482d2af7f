//! Command dispatch

use eventstatus_api::{
    ClientRole, Command, ErrorInfo, HealthStatus, PING_MESSAGE, Request, Response,
    ResponsePayload, API_VERSION,
};
use eventstatus_config::load_config;
use eventstatus_core::{CatalogLookup, CheckLastEventStatus, LoadLastEvent};
use eventstatus_util::{ClientId, Clock, EventStatusError, RateLimiter, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Requests allowed per client per second
const RATE_LIMIT_BURST: u32 = 30;

/// Answers protocol requests against the event catalog
pub struct Dispatcher {
    checker: CheckLastEventStatus,
    catalog: Arc<CatalogLookup>,
    config_path: PathBuf,
    rate_limiter: Mutex<RateLimiter>,
}

impl Dispatcher {
    /// Dispatcher whose status checks read the catalog itself
    pub fn new(
        catalog: Arc<CatalogLookup>,
        clock: Arc<dyn Clock>,
        config_path: impl AsRef<Path>,
    ) -> Self {
        Self::with_lookup(catalog.clone(), catalog, clock, config_path)
    }

    /// Status checks go to `lookup`; `catalog` still backs health and reload
    pub fn with_lookup(
        lookup: Arc<dyn LoadLastEvent>,
        catalog: Arc<CatalogLookup>,
        clock: Arc<dyn Clock>,
        config_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            checker: CheckLastEventStatus::new(lookup, clock),
            catalog,
            config_path: config_path.as_ref().to_path_buf(),
            rate_limiter: Mutex::new(RateLimiter::new(RATE_LIMIT_BURST, Duration::from_secs(1))),
        }
    }

    pub fn with_rate_limit(mut self, burst: u32, period: Duration) -> Self {
        self.rate_limiter = Mutex::new(RateLimiter::new(burst, period));
        self
    }

    /// Charge one request to `client_id`.
    /// Returns the reply to send instead of dispatching when the client is over its limit.
    pub fn throttle(&self, client_id: &ClientId, request_id: u64) -> Option<Response> {
        if self.rate_limiter.lock().unwrap().check(client_id) {
            return None;
        }

        debug!(client_id = %client_id, request_id, "Rate limited");
        Some(Response::error(
            request_id,
            ErrorInfo::from(&EventStatusError::RateLimited),
        ))
    }

    /// Drop rate limiting state for a disconnected client
    pub fn forget_client(&self, client_id: &ClientId) {
        self.rate_limiter.lock().unwrap().remove_client(client_id);
    }

    pub async fn dispatch(&self, request: Request, role: ClientRole) -> Response {
        let request_id = request.request_id;

        if request.api_version != API_VERSION {
            let err = EventStatusError::invalid_request(format!(
                "unsupported api_version {} (expected {})",
                request.api_version, API_VERSION
            ));
            return Response::error(request_id, ErrorInfo::from(&err));
        }

        match self.handle(request.command, role).await {
            Ok(payload) => Response::success(request_id, payload),
            Err(err) => {
                warn!(request_id, error = %err, "Request failed");
                Response::error(request_id, ErrorInfo::from(&err))
            }
        }
    }

    async fn handle(&self, command: Command, role: ClientRole) -> Result<ResponsePayload> {
        match command {
            Command::Ping => Ok(ResponsePayload::Pong {
                message: PING_MESSAGE.to_string(),
            }),

            Command::CheckStatus { group_id } => {
                let view = self
                    .checker
                    .inspect(&group_id)
                    .await
                    .map_err(|e| EventStatusError::lookup(e.to_string()))?;
                Ok(ResponsePayload::Status(view))
            }

            Command::GetHealth => Ok(ResponsePayload::Health(HealthStatus {
                live: true,
                ready: true,
                group_count: self.catalog.group_count(),
            })),

            Command::ReloadConfig => {
                if !role.can_reload_config() {
                    return Err(EventStatusError::permission("reload_config requires admin role"));
                }
                let group_count = self.reload()?;
                Ok(ResponsePayload::ConfigReloaded { group_count })
            }
        }
    }

    /// Re-read the config file and swap in its events.
    /// On failure the previously loaded events stay in place.
    pub fn reload(&self) -> Result<usize> {
        let catalog = load_config(&self.config_path).map_err(|e| {
            EventStatusError::config(format!("{}: {}", self.config_path.display(), e))
        })?;

        let group_count = self.catalog.replace(&catalog);
        info!(
            config_path = %self.config_path.display(),
            group_count,
            "Configuration reloaded"
        );
        Ok(group_count)
    }
}
