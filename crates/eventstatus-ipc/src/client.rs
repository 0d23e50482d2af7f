//! IPC client implementation

use eventstatus_api::{
    Command, HealthStatus, Request, Response, ResponsePayload, ResponseResult, StatusView,
};
use eventstatus_util::GroupId;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};

use crate::{IpcError, IpcResult};

/// IPC Client for connecting to eventstatusd
pub struct IpcClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    next_request_id: u64,
}

impl IpcClient {
    pub async fn connect(socket_path: impl AsRef<Path>) -> IpcResult<Self> {
        let stream = UnixStream::connect(socket_path).await?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            next_request_id: 1,
        })
    }

    /// Send a command and wait for its response
    pub async fn send(&mut self, command: Command) -> IpcResult<Response> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let request = Request::new(request_id, command);
        let mut json = serde_json::to_string(&request)?;
        json.push('\n');

        self.writer.write_all(json.as_bytes()).await?;

        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await?;
        if n == 0 {
            return Err(IpcError::ConnectionClosed);
        }

        let response: Response = serde_json::from_str(line.trim())?;
        if response.request_id != request_id {
            return Err(IpcError::UnexpectedResponse(format!(
                "expected response to request {}, got {}",
                request_id, response.request_id
            )));
        }

        Ok(response)
    }

    /// Send a command and unwrap the success payload
    pub async fn call(&mut self, command: Command) -> IpcResult<ResponsePayload> {
        match self.send(command).await?.result {
            ResponseResult::Ok(payload) => Ok(payload),
            ResponseResult::Err(e) => Err(IpcError::ServerError(format!(
                "{:?}: {}",
                e.code, e.message
            ))),
        }
    }

    pub async fn ping(&mut self) -> IpcResult<String> {
        match self.call(Command::Ping).await? {
            ResponsePayload::Pong { message } => Ok(message),
            other => Err(unexpected(&other)),
        }
    }

    pub async fn check_status(&mut self, group_id: GroupId) -> IpcResult<StatusView> {
        match self.call(Command::CheckStatus { group_id }).await? {
            ResponsePayload::Status(view) => Ok(view),
            other => Err(unexpected(&other)),
        }
    }

    pub async fn health(&mut self) -> IpcResult<HealthStatus> {
        match self.call(Command::GetHealth).await? {
            ResponsePayload::Health(health) => Ok(health),
            other => Err(unexpected(&other)),
        }
    }

    /// Returns the number of groups loaded after the reload
    pub async fn reload_config(&mut self) -> IpcResult<usize> {
        match self.call(Command::ReloadConfig).await? {
            ResponsePayload::ConfigReloaded { group_count } => Ok(group_count),
            other => Err(unexpected(&other)),
        }
    }
}

fn unexpected(payload: &ResponsePayload) -> IpcError {
    IpcError::UnexpectedResponse(format!("{:?}", payload))
}
