//! Async client for the score service
//!
//! Opens one connection per request; the service is low traffic and a
//! short-lived connection never goes stale between games.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::protocol::{Request, Response};
use crate::store::{HighScore, Submission};

/// Upper bound for connect + request + response
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct ScoreClient {
    addr: String,
}

impl ScoreClient {
    /// Client for the server at `addr` (`host:port`)
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Best `limit` scores, highest first
    pub async fn list(&self, limit: usize) -> Result<Vec<HighScore>> {
        match self.request(&Request::list(limit)).await? {
            Response::Scores { scores } => Ok(scores),
            other => Err(unexpected(other)),
        }
    }

    /// Submit a result; returns the entry as stored
    pub async fn submit(&self, submission: &Submission) -> Result<HighScore> {
        match self.request(&Request::submit(submission)).await? {
            Response::Stored { entry } => Ok(entry),
            other => Err(unexpected(other)),
        }
    }

    /// Server timestamp if the service is up
    pub async fn health(&self) -> Result<u64> {
        match self.request(&Request::Health).await? {
            Response::Health { ts, .. } => Ok(ts),
            other => Err(unexpected(other)),
        }
    }

    async fn request(&self, request: &Request) -> Result<Response> {
        timeout(REQUEST_TIMEOUT, self.round_trip(request))
            .await
            .with_context(|| format!("score server {} timed out", self.addr))?
    }

    async fn round_trip(&self, request: &Request) -> Result<Response> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .with_context(|| format!("connecting to score server {}", self.addr))?;
        let (reader, mut writer) = stream.into_split();

        let mut line = serde_json::to_vec(request)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;

        let mut reply = String::new();
        let n = BufReader::new(reader).read_line(&mut reply).await?;
        if n == 0 {
            bail!("score server {} closed the connection", self.addr);
        }

        serde_json::from_str(reply.trim()).context("malformed score server response")
    }
}

fn unexpected(response: Response) -> anyhow::Error {
    match response {
        Response::Error { code, message } => anyhow!("{}: {}", code.as_str(), message),
        other => anyhow!("unexpected response: {:?}", other),
    }
}
