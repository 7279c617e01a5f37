//! Score service wire protocol
//!
//! One JSON object per line in each direction, tagged by `type`:
//!
//! - `{"type":"list","limit":10}` -> `{"type":"scores","scores":[..]}`
//! - `{"type":"submit","name":"ann","score":1200,"level":1,"lines":12}`
//!   -> `{"type":"stored","entry":{..}}`
//! - `{"type":"health"}` -> `{"type":"health","status":"ok","ts":..}`
//!
//! Failures answer `{"type":"error","code":..,"message":..}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{HighScore, Submission, SubmitError};

/// Entries returned by `list` when no limit is given
pub const DEFAULT_LIST_LIMIT: usize = 10;
/// Largest `limit` honored by `list`
pub const MAX_LIST_LIMIT: usize = 100;

/// Client -> server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "list")]
    List {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
    #[serde(rename = "submit")]
    Submit(SubmitRequest),
    #[serde(rename = "health")]
    Health,
}

impl Request {
    pub fn list(limit: usize) -> Self {
        Request::List { limit: Some(limit) }
    }

    pub fn submit(submission: &Submission) -> Self {
        Request::Submit(SubmitRequest {
            name: Some(Value::from(submission.name.as_str())),
            score: Some(Value::from(submission.score)),
            level: Some(Value::from(submission.level)),
            lines: Some(Value::from(submission.lines)),
        })
    }
}

/// Raw submit payload
///
/// Fields are loosely typed so that a wrong type is reported as an invalid
/// submission rather than an unparsable request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Value>,
}

impl SubmitRequest {
    /// Validate into a [`Submission`]
    ///
    /// Name must be a non-empty string and score a number. Level and lines
    /// default to 0 when absent or not numeric. Numbers are clamped to
    /// `0..=u32::MAX` and truncated toward zero.
    pub fn validate(&self) -> Result<Submission, SubmitError> {
        let name = match &self.name {
            Some(Value::String(s)) => s.as_str(),
            _ => return Err(SubmitError::MissingName),
        };
        let score = self
            .score
            .as_ref()
            .and_then(as_count)
            .ok_or(SubmitError::MissingScore)?;
        let level = self.level.as_ref().and_then(as_count).unwrap_or(0);
        let lines = self.lines.as_ref().and_then(as_count).unwrap_or(0);

        Submission::new(name, score, level, lines)
    }
}

fn as_count(v: &Value) -> Option<u32> {
    // f64 -> u32 casts saturate (NaN becomes 0).
    v.as_f64().map(|n| n as u32)
}

/// Server -> client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    #[serde(rename = "scores")]
    Scores { scores: Vec<HighScore> },
    #[serde(rename = "stored")]
    Stored { entry: HighScore },
    #[serde(rename = "health")]
    Health { status: String, ts: u64 },
    #[serde(rename = "error")]
    Error { code: ErrorCode, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_submission")]
    InvalidSubmission,
    #[serde(rename = "invalid_request")]
    InvalidRequest,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidSubmission => "invalid_submission",
            ErrorCode::InvalidRequest => "invalid_request",
        }
    }
}

impl From<SubmitError> for Response {
    fn from(err: SubmitError) -> Self {
        create_error(ErrorCode::InvalidSubmission, err.message())
    }
}

/// Parse one inbound line
pub fn parse_request(json: &str) -> Result<Request, serde_json::Error> {
    serde_json::from_str(json)
}

/// Clamp a requested list size
pub fn list_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT)
}

pub fn create_error(code: ErrorCode, message: &str) -> Response {
    Response::Error {
        code,
        message: message.to_string(),
    }
}

pub fn create_health() -> Response {
    Response::Health {
        status: "ok".to_string(),
        ts: current_timestamp_ms(),
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_request(r#"{"type":"list"}"#).unwrap(),
            Request::List { limit: None }
        );
        assert_eq!(
            parse_request(r#"{"type":"list","limit":3}"#).unwrap(),
            Request::list(3)
        );
    }

    #[test]
    fn test_parse_health() {
        assert_eq!(parse_request(r#"{"type":"health"}"#).unwrap(), Request::Health);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_request("not json").is_err());
        assert!(parse_request(r#"{"type":"drop_table"}"#).is_err());
        assert!(parse_request(r#"{"limit":3}"#).is_err());
    }

    #[test]
    fn test_list_limit_defaults_and_clamps() {
        assert_eq!(list_limit(None), 10);
        assert_eq!(list_limit(Some(3)), 3);
        assert_eq!(list_limit(Some(1000)), 100);
    }

    #[test]
    fn test_submit_validation() {
        let Request::Submit(req) =
            parse_request(r#"{"type":"submit","name":"ann","score":1200}"#).unwrap()
        else {
            panic!("expected submit");
        };
        let sub = req.validate().unwrap();
        assert_eq!(sub.name, "ann");
        assert_eq!(sub.score, 1200);
        assert_eq!(sub.level, 0);
        assert_eq!(sub.lines, 0);
    }

    #[test]
    fn test_submit_missing_fields() {
        for line in [
            r#"{"type":"submit","score":10}"#,
            r#"{"type":"submit","name":"","score":10}"#,
            r#"{"type":"submit","name":42,"score":10}"#,
            r#"{"type":"submit","name":"ann"}"#,
            r#"{"type":"submit","name":"ann","score":"lots"}"#,
        ] {
            let Ok(Request::Submit(req)) = parse_request(line) else {
                panic!("submit should parse: {line}");
            };
            let err = req.validate().unwrap_err();
            assert_eq!(err.code(), "invalid_submission", "{line}");
        }
    }

    #[test]
    fn test_negative_and_fractional_numbers_clamp() {
        let req = SubmitRequest {
            name: Some(Value::from("x")),
            score: Some(Value::from(-5)),
            level: Some(Value::from(2.9)),
            lines: Some(Value::from("many")),
        };
        let sub = req.validate().unwrap();
        assert_eq!(sub.score, 0);
        assert_eq!(sub.level, 2);
        assert_eq!(sub.lines, 0);
    }

    #[test]
    fn test_error_serialization() {
        let json = serde_json::to_string(&Response::from(SubmitError::MissingName)).unwrap();
        assert_eq!(
            json,
            r#"{"type":"error","code":"invalid_submission","message":"Name and score are required"}"#
        );
    }

    #[test]
    fn test_submit_request_round_trips_submission() {
        let sub = Submission::new("bob", 900, 1, 11).unwrap();
        let Request::Submit(req) = Request::submit(&sub) else {
            panic!("expected submit");
        };
        assert_eq!(req.validate().unwrap(), sub);
    }
}
