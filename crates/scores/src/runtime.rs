//! Reporter runtime integration.
//!
//! Bridges the sync game loop with the async score client. The game never
//! waits on the network: requests are queued, and fresh score lists are
//! picked up with `try_recv_scores` on a later frame.

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::client::ScoreClient;
use crate::store::{HighScore, Submission};

/// Entries fetched for display
pub const DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Clone)]
enum ReporterRequest {
    Submit(Submission),
    Refresh,
}

/// Running reporter instance.
pub struct ScoreReporter {
    _rt: Runtime,
    req_tx: mpsc::UnboundedSender<ReporterRequest>,
    scores_rx: mpsc::UnboundedReceiver<Vec<HighScore>>,
}

impl ScoreReporter {
    /// Start a reporter talking to the server at `addr`
    pub fn start(addr: impl Into<String>) -> Result<Self> {
        let client = ScoreClient::new(addr);
        let (req_tx, mut req_rx) = mpsc::unbounded_channel::<ReporterRequest>();
        let (scores_tx, scores_rx) = mpsc::unbounded_channel::<Vec<HighScore>>();

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("creating score reporter runtime")?;

        rt.spawn(async move {
            while let Some(req) = req_rx.recv().await {
                if let ReporterRequest::Submit(submission) = req {
                    match client.submit(&submission).await {
                        Ok(entry) => info!("submitted score {} as {}", entry.score, entry.name),
                        Err(e) => {
                            warn!("score submission failed: {:#}", e);
                            continue;
                        }
                    }
                }

                match client.list(DISPLAY_LIMIT).await {
                    Ok(scores) => {
                        if scores_tx.send(scores).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("fetching high scores failed: {:#}", e),
                }
            }
        });

        Ok(Self {
            _rt: rt,
            req_tx,
            scores_rx,
        })
    }

    /// Queue a result for submission. Never blocks; failures are only logged.
    pub fn submit(&self, submission: Submission) {
        let _ = self.req_tx.send(ReporterRequest::Submit(submission));
    }

    /// Queue a fetch of the current high-score list
    pub fn refresh(&self) {
        let _ = self.req_tx.send(ReporterRequest::Refresh);
    }

    /// Latest list fetched since the previous call, if any
    pub fn try_recv_scores(&mut self) -> Option<Vec<HighScore>> {
        let mut latest = None;
        while let Ok(scores) = self.scores_rx.try_recv() {
            latest = Some(scores);
        }
        latest
    }
}
