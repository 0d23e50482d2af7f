//! Socket round trips between IpcClient and IpcServer

use chrono::{TimeZone, Utc};
use eventstatus_api::{
    ClientRole, Command, ErrorCode, EventStatus, PING_MESSAGE, Response, ResponsePayload,
    ResponseResult, StatusView,
};
use eventstatus_ipc::{IpcClient, IpcError, IpcServer, ServerMessage};
use eventstatus_util::GroupId;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::mpsc;

/// Start a server whose requests are answered by a canned responder.
/// Connection lifecycle messages are forwarded to the returned receiver.
async fn start_server() -> (TempDir, Arc<IpcServer>, mpsc::UnboundedReceiver<ServerMessage>) {
    let dir = tempfile::tempdir().unwrap();
    let mut server = IpcServer::new(dir.path().join("eventstatusd.sock"));
    server.start().await.unwrap();
    let server = Arc::new(server);

    let accept = server.clone();
    tokio::spawn(async move {
        let _ = accept.run().await;
    });

    let mut messages = server.take_message_receiver().await.unwrap();
    let (lifecycle_tx, lifecycle_rx) = mpsc::unbounded_channel();
    let responder = server.clone();
    tokio::spawn(async move {
        while let Some(msg) = messages.recv().await {
            match msg {
                ServerMessage::Request { client_id, request } => {
                    let payload = match request.command {
                        Command::Ping => ResponsePayload::Pong {
                            message: PING_MESSAGE.into(),
                        },
                        Command::CheckStatus { group_id } => ResponsePayload::Status(StatusView {
                            group_id,
                            status: EventStatus::Pendent,
                            checked_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
                        }),
                        _ => ResponsePayload::ConfigReloaded { group_count: 0 },
                    };
                    let _ = responder
                        .send_response(&client_id, Response::success(request.request_id, payload))
                        .await;
                }
                other => {
                    let _ = lifecycle_tx.send(other);
                }
            }
        }
    });

    (dir, server, lifecycle_rx)
}

#[tokio::test]
async fn test_ping_round_trip() {
    let (_dir, server, _lifecycle) = start_server().await;

    let mut client = IpcClient::connect(server.socket_path()).await.unwrap();
    assert_eq!(client.ping().await.unwrap(), "Hello World");
}

#[tokio::test]
async fn test_check_status_round_trip() {
    let (_dir, server, _lifecycle) = start_server().await;

    let mut client = IpcClient::connect(server.socket_path()).await.unwrap();
    let view = client.check_status(GroupId::new("any_group_id")).await.unwrap();

    assert_eq!(view.group_id.as_str(), "any_group_id");
    assert_eq!(view.status, EventStatus::Pendent);
}

#[tokio::test]
async fn test_request_ids_increase() {
    let (_dir, server, _lifecycle) = start_server().await;

    let mut client = IpcClient::connect(server.socket_path()).await.unwrap();
    let first = client.send(Command::Ping).await.unwrap();
    let second = client.send(Command::Ping).await.unwrap();

    assert_eq!(first.request_id, 1);
    assert_eq!(second.request_id, 2);
}

#[tokio::test]
async fn test_unexpected_payload_is_reported() {
    let (_dir, server, _lifecycle) = start_server().await;

    let mut client = IpcClient::connect(server.socket_path()).await.unwrap();
    // The canned responder answers get_health with the wrong payload
    let result = client.health().await;
    assert!(matches!(result, Err(IpcError::UnexpectedResponse(_))));
}

#[tokio::test]
async fn test_malformed_line_gets_invalid_request() {
    let (_dir, server, _lifecycle) = start_server().await;

    let stream = UnixStream::connect(server.socket_path()).await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    write_half.write_all(b"{not json}\n").await.unwrap();

    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    reader.read_line(&mut line).await.unwrap();

    let response: Response = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(response.request_id, 0);
    match response.result {
        ResponseResult::Err(e) => assert_eq!(e.code, ErrorCode::InvalidRequest),
        ResponseResult::Ok(payload) => panic!("expected error, got {:?}", payload),
    }
}

#[tokio::test]
async fn test_connect_and_disconnect_are_reported() {
    let (_dir, server, mut lifecycle) = start_server().await;

    let client = IpcClient::connect(server.socket_path()).await.unwrap();

    let connected = tokio::time::timeout(Duration::from_secs(5), lifecycle.recv())
        .await
        .unwrap()
        .unwrap();
    let client_id = match connected {
        ServerMessage::ClientConnected { client_id, info } => {
            // Test peers run as the server's own user
            assert_eq!(info.role, ClientRole::Admin);
            client_id
        }
        other => panic!("expected ClientConnected, got {:?}", other),
    };

    drop(client);

    let disconnected = tokio::time::timeout(Duration::from_secs(5), lifecycle.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        disconnected,
        ServerMessage::ClientDisconnected { client_id: id } if id == client_id
    ));
    assert_eq!(server.client_count().await, 0);
}
