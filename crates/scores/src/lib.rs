//! High-score service.
//!
//! - [`store`]: bounded, sorted in-memory table
//! - [`protocol`]: line-delimited JSON messages
//! - [`server`]: tokio TCP server
//! - [`client`]: async client
//! - [`runtime`]: [`ScoreReporter`], a fire-and-forget bridge for sync callers

pub mod client;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod store;

pub use client::ScoreClient;
pub use protocol::{parse_request, ErrorCode, Request, Response};
pub use runtime::ScoreReporter;
pub use server::{run_server, ServerConfig, ServerState, MAX_LINE_BYTES};
pub use store::{HighScore, ScoreStore, Submission, SubmitError};
