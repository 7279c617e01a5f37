//! In-memory high-score table
//!
//! Entries are kept sorted by score, highest first. Equal scores keep their
//! submission order. The table holds at most `capacity` entries; anything
//! pushed below that line is dropped.

use serde::{Deserialize, Serialize};

/// Longest player name kept, in characters
pub const MAX_NAME_CHARS: usize = 20;
/// Entries retained by default
pub const DEFAULT_CAPACITY: usize = 100;

/// One stored result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub id: u64,
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Milliseconds since the Unix epoch, assigned by the server
    pub timestamp_ms: u64,
}

/// A validated result waiting to be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub score: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub lines: u32,
}

impl Submission {
    /// Build a submission, rejecting an empty name
    pub fn new(name: &str, score: u32, level: u32, lines: u32) -> Result<Self, SubmitError> {
        if name.is_empty() {
            return Err(SubmitError::MissingName);
        }
        Ok(Self {
            name: truncate_name(name),
            score,
            level,
            lines,
        })
    }
}

/// Why a submission was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    MissingName,
    MissingScore,
}

impl SubmitError {
    pub fn code(self) -> &'static str {
        match self {
            SubmitError::MissingName | SubmitError::MissingScore => "invalid_submission",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SubmitError::MissingName | SubmitError::MissingScore => "Name and score are required",
        }
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SubmitError {}

/// First `MAX_NAME_CHARS` characters of `name`
pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_CHARS).collect()
}

/// Sorted, bounded score table
#[derive(Debug, Clone)]
pub struct ScoreStore {
    entries: Vec<HighScore>,
    capacity: usize,
    next_id: u64,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
            next_id: 1,
        }
    }

    /// Best `limit` entries, highest score first
    pub fn top(&self, limit: usize) -> Vec<HighScore> {
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Store a result and return the entry as recorded
    ///
    /// The entry is returned even when it did not make the table.
    pub fn submit(&mut self, submission: Submission, timestamp_ms: u64) -> HighScore {
        let entry = HighScore {
            id: self.next_id,
            name: truncate_name(&submission.name),
            score: submission.score,
            level: submission.level,
            lines: submission.lines,
            timestamp_ms,
        };
        self.next_id += 1;

        self.entries.push(entry.clone());
        // Stable sort: ties stay in submission order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ScoreStore {
    fn default() -> Self {
        Self::new()
    }
}
