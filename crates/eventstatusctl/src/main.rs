//! eventstatusctl - Query eventstatusd from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventstatus_ipc::IpcClient;
use eventstatus_util::{default_socket_path, format_timestamp, GroupId};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// eventstatusctl - Ask eventstatusd where an event is in its lifecycle
#[derive(Parser, Debug)]
#[command(name = "eventstatusctl")]
#[command(about = "Command line client for eventstatusd", long_about = None)]
struct Args {
    /// Socket path for eventstatusd connection (or set EVENTSTATUS_SOCKET env var)
    #[arg(short, long, env = "EVENTSTATUS_SOCKET")]
    socket: Option<PathBuf>,

    /// Print raw JSON payloads
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: CtlCommand,
}

#[derive(Subcommand, Debug)]
enum CtlCommand {
    /// Print the status of a group's last event (active, pendent or done)
    Check {
        group_id: String,
    },
    /// Check that the service answers
    Ping,
    /// Show service health
    Health,
    /// Reload the service configuration (admin only)
    Reload,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let socket_path = args.socket.unwrap_or_else(default_socket_path);
    debug!(socket_path = %socket_path.display(), "Connecting");

    let mut client = IpcClient::connect(&socket_path)
        .await
        .with_context(|| format!("Failed to connect to eventstatusd at {:?}", socket_path))?;

    match args.command {
        CtlCommand::Check { group_id } => {
            let view = client.check_status(GroupId::new(group_id)).await?;
            if args.json {
                println!("{}", serde_json::to_string(&view)?);
            } else {
                println!(
                    "{}: {} (as of {})",
                    view.group_id,
                    view.status,
                    format_timestamp(&view.checked_at)
                );
            }
        }

        CtlCommand::Ping => {
            let message = client.ping().await?;
            println!("{}", message);
        }

        CtlCommand::Health => {
            let health = client.health().await?;
            if args.json {
                println!("{}", serde_json::to_string(&health)?);
            } else {
                println!("live:   {}", health.live);
                println!("ready:  {}", health.ready);
                println!("groups: {}", health.group_count);
            }
        }

        CtlCommand::Reload => {
            let group_count = client
                .reload_config()
                .await
                .context("Reload rejected")?;
            println!("Configuration reloaded ({} groups)", group_count);
        }
    }

    Ok(())
}
