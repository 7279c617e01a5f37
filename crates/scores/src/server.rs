//! TCP server for the score service
//!
//! Each connection gets its own task. Requests on a connection are answered
//! in order, one response line per request line.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, RwLock};

use crate::protocol::{
    create_error, create_health, current_timestamp_ms, list_limit, parse_request, ErrorCode,
    Request, Response,
};
use crate::store::{ScoreStore, DEFAULT_CAPACITY};

/// Default listen port
pub const DEFAULT_PORT: u16 = 7878;

/// Longest request line accepted, newline included
pub const MAX_LINE_BYTES: u64 = 4096;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Entries kept in the table
    pub capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("BLOCKFALL_SCORES_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("BLOCKFALL_SCORES_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let capacity = env::var("BLOCKFALL_SCORES_CAPACITY")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.capacity);

        Self {
            host,
            port,
            capacity,
        }
    }

    /// `host:port`, resolvable by `TcpListener::bind` and `TcpStream::connect`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared server state
pub struct ServerState {
    store: RwLock<ScoreStore>,
}

impl ServerState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            store: RwLock::new(ScoreStore::with_capacity(config.capacity)),
        }
    }

    /// Answer one request line
    pub async fn handle_line(&self, line: &str) -> Response {
        let request = match parse_request(line) {
            Ok(request) => request,
            Err(e) => {
                debug!("unparsable request: {}", e);
                return create_error(ErrorCode::InvalidRequest, &format!("invalid request: {e}"));
            }
        };

        match request {
            Request::List { limit } => {
                let scores = self.store.read().await.top(list_limit(limit));
                Response::Scores { scores }
            }
            Request::Submit(req) => match req.validate() {
                Ok(submission) => {
                    let entry = self
                        .store
                        .write()
                        .await
                        .submit(submission, current_timestamp_ms());
                    info!(
                        "stored score {} for {} (id {})",
                        entry.score, entry.name, entry.id
                    );
                    Response::Stored { entry }
                }
                Err(e) => {
                    debug!("rejected submission: {}", e);
                    Response::from(e)
                }
            },
            Request::Health => create_health(),
        }
    }
}

/// Run the score server until the listener fails
///
/// `ready_tx` receives the bound address once the server accepts connections
/// (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.address()).await?;
    let bound = listener.local_addr()?;
    info!(
        "score server listening on {} (keeping top {})",
        bound, config.capacity
    );
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::new(&config));
    let mut client_id_counter = 0usize;

    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        debug!("client {} connected from {}", client_id, addr);

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, &state).await {
                warn!("client {} error: {}", client_id, e);
            }
            debug!("client {} disconnected", client_id);
        });
    }
}

/// Handle a single client connection
///
/// A line longer than [`MAX_LINE_BYTES`] gets an `invalid_request` error and
/// the connection is closed.
async fn handle_client(socket: TcpStream, state: &ServerState) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    let mut line: Vec<u8> = Vec::with_capacity(1024);
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    loop {
        line.clear();
        let n = (&mut reader)
            .take(MAX_LINE_BYTES)
            .read_until(b'\n', &mut line)
            .await?;
        if n == 0 {
            break;
        }

        let too_long = n as u64 == MAX_LINE_BYTES && line.last() != Some(&b'\n');
        let response = if too_long {
            debug!("request line over {} bytes", MAX_LINE_BYTES);
            create_error(ErrorCode::InvalidRequest, "request line too long")
        } else {
            match std::str::from_utf8(&line) {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => state.handle_line(text.trim()).await,
                Err(_) => create_error(ErrorCode::InvalidRequest, "request is not UTF-8"),
            }
        };

        buf.clear();
        serde_json::to_writer(&mut buf, &response)?;
        buf.push(b'\n');
        writer.write_all(&buf).await?;
        writer.flush().await?;

        if too_long {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ServerState {
        ServerState::new(&ServerConfig::default())
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "127.0.0.1:7878");
        assert_eq!(config.capacity, 100);
    }

    #[test]
    fn test_submit_then_list() {
        let state = state();
        tokio_test::block_on(async {
            let stored = state
                .handle_line(r#"{"type":"submit","name":"ann","score":50,"level":0,"lines":3}"#)
                .await;
            let Response::Stored { entry } = stored else {
                panic!("expected stored, got {stored:?}");
            };
            assert_eq!(entry.lines, 3);

            state
                .handle_line(r#"{"type":"submit","name":"bob","score":70}"#)
                .await;

            let listed = state.handle_line(r#"{"type":"list"}"#).await;
            let Response::Scores { scores } = listed else {
                panic!("expected scores, got {listed:?}");
            };
            let names: Vec<&str> = scores.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["bob", "ann"]);
        });
    }

    #[test]
    fn test_invalid_lines() {
        let state = state();
        tokio_test::block_on(async {
            let resp = state.handle_line("{oops").await;
            assert!(matches!(
                resp,
                Response::Error {
                    code: ErrorCode::InvalidRequest,
                    ..
                }
            ));

            let resp = state.handle_line(r#"{"type":"submit","name":"ann"}"#).await;
            assert_eq!(
                resp,
                create_error(ErrorCode::InvalidSubmission, "Name and score are required")
            );
        });
    }

    #[tokio::test]
    async fn test_health() {
        let resp = state().handle_line(r#"{"type":"health"}"#).await;
        let Response::Health { status, ts } = resp else {
            panic!("expected health");
        };
        assert_eq!(status, "ok");
        assert!(ts > 0);
    }
}
