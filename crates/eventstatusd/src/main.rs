//! eventstatusd - The eventstatus background service
//!
//! This is the main entry point for the eventstatusd service.
//! It wires together all the components:
//! - Configuration loading
//! - The event catalog lookup
//! - Request dispatch
//! - IPC server

use anyhow::{Context, Result};
use clap::Parser;
use eventstatus_api::ClientRole;
use eventstatus_config::load_config;
use eventstatus_core::CatalogLookup;
use eventstatus_ipc::{IpcServer, ServerMessage};
use eventstatus_util::{default_config_path, is_mock_time_active, SystemClock};
use eventstatusd::Dispatcher;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// eventstatusd - Reports whether a group's last event is active, pendent or done
#[derive(Parser, Debug)]
#[command(name = "eventstatusd")]
#[command(about = "Event lifecycle status service", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/eventstatus/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Socket path override (or set EVENTSTATUS_SOCKET env var)
    #[arg(short, long, env = "EVENTSTATUS_SOCKET")]
    socket: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Main service state
struct Service {
    dispatcher: Arc<Dispatcher>,
    ipc: Arc<IpcServer>,
}

impl Service {
    async fn new(args: &Args) -> Result<Self> {
        // Load configuration
        let catalog = load_config(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        info!(
            config_path = %args.config.display(),
            event_count = catalog.events.len(),
            "Configuration loaded"
        );

        let socket_path = args
            .socket
            .clone()
            .unwrap_or_else(|| catalog.service.socket_path.clone());

        let lookup = Arc::new(CatalogLookup::from_catalog(&catalog));
        let dispatcher = Dispatcher::new(lookup, Arc::new(SystemClock), &args.config);

        if is_mock_time_active() {
            warn!("Mock time is active, status checks use a shifted clock");
        }

        // Initialize IPC server
        let mut ipc = IpcServer::new(&socket_path);
        ipc.start().await?;

        info!(socket_path = %socket_path.display(), "IPC server started");

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            ipc: Arc::new(ipc),
        })
    }

    async fn run(self) -> Result<()> {
        let ipc_ref = self.ipc.clone();
        let mut ipc_messages = ipc_ref
            .take_message_receiver()
            .await
            .context("IPC message receiver already taken")?;

        let dispatcher = self.dispatcher.clone();

        // Spawn IPC accept task
        let ipc_accept = ipc_ref.clone();
        tokio::spawn(async move {
            if let Err(e) = ipc_accept.run().await {
                error!(error = %e, "IPC server error");
            }
        });

        // Set up signal handlers
        let mut sigterm = signal(SignalKind::terminate())
            .context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt())
            .context("Failed to create SIGINT handler")?;
        let mut sighup = signal(SignalKind::hangup())
            .context("Failed to create SIGHUP handler")?;

        info!("Service running");

        loop {
            tokio::select! {
                // Signal: SIGTERM or SIGINT - graceful shutdown
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }

                // Signal: SIGHUP - reload configuration
                _ = sighup.recv() => {
                    info!("Received SIGHUP, reloading configuration");
                    if let Err(e) = dispatcher.reload() {
                        warn!(error = %e, "Reload failed, keeping previous configuration");
                    }
                }

                // IPC messages
                Some(msg) = ipc_messages.recv() => {
                    Self::handle_ipc_message(&dispatcher, &ipc_ref, msg).await;
                }
            }
        }

        info!("Shutting down eventstatusd");
        ipc_ref.shutdown();

        info!("Shutdown complete");
        Ok(())
    }

    async fn handle_ipc_message(
        dispatcher: &Arc<Dispatcher>,
        ipc: &Arc<IpcServer>,
        msg: ServerMessage,
    ) {
        match msg {
            ServerMessage::Request { client_id, request } => {
                // Rate limiting
                if let Some(response) = dispatcher.throttle(&client_id, request.request_id) {
                    let _ = ipc.send_response(&client_id, response).await;
                    return;
                }

                let role = ipc
                    .get_client_info(&client_id)
                    .await
                    .map(|info| info.role)
                    .unwrap_or(ClientRole::Reader);

                // Lookups may be slow; do not hold up the event loop
                let dispatcher = dispatcher.clone();
                let ipc = ipc.clone();
                tokio::spawn(async move {
                    let response = dispatcher.dispatch(request, role).await;
                    if let Err(e) = ipc.send_response(&client_id, response).await {
                        debug!(client_id = %client_id, error = %e, "Dropped response");
                    }
                });
            }

            ServerMessage::ClientConnected { client_id, info } => {
                info!(
                    client_id = %client_id,
                    role = ?info.role,
                    uid = ?info.uid,
                    "Client connected"
                );
            }

            ServerMessage::ClientDisconnected { client_id } => {
                debug!(client_id = %client_id, "Client disconnected");

                dispatcher.forget_client(&client_id);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "eventstatusd starting"
    );

    let service = Service::new(&args).await?;
    service.run().await
}
