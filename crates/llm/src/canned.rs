//! Deterministic oracle
//!
//! Replies are keyed by criterion code. The first configured code found in
//! the user prompt selects the reply; otherwise the `DEFAULT` reply is used.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use call_qc_core::{Oracle, OracleError};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Key of the fallback reply
pub const DEFAULT_KEY: &str = "DEFAULT";

/// Canned-response oracle that counts and records its calls
#[derive(Debug)]
pub struct CannedOracle {
    replies: Vec<(String, String)>,
    default_reply: String,
    failure: Option<OracleError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl Default for CannedOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl CannedOracle {
    pub fn new() -> Self {
        let default_reply = json!({
            "score": 2,
            "reasoning": "Canned reasoning",
            "evidence": "",
            "probability": "LOW",
        });
        Self {
            replies: Vec::new(),
            default_reply: default_reply.to_string(),
            failure: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Oracle whose every call fails with `error`
    pub fn failing(error: OracleError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    /// Reply with a JSON object for a criterion code (or `DEFAULT`)
    pub fn with_reply(self, code: impl Into<String>, reply: Value) -> Self {
        self.with_raw_reply(code, reply.to_string())
    }

    /// Reply with arbitrary text for a criterion code (or `DEFAULT`)
    pub fn with_raw_reply(mut self, code: impl Into<String>, raw: impl Into<String>) -> Self {
        let code = code.into();
        let raw = raw.into();
        if code == DEFAULT_KEY {
            self.default_reply = raw;
        } else if let Some(slot) = self.replies.iter_mut().find(|(c, _)| *c == code) {
            slot.1 = raw;
        } else {
            self.replies.push((code, raw));
        }
        self
    }

    /// Number of `complete` calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// User prompts received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Oracle for CannedOracle {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(user.to_string());

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let reply = self
            .replies
            .iter()
            .find(|(code, _)| user.contains(code.as_str()))
            .map(|(_, raw)| raw.clone())
            .unwrap_or_else(|| self.default_reply.clone());
        Ok(reply)
    }

    fn name(&self) -> &str {
        "canned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_picks_reply_by_code() {
        let oracle = CannedOracle::new()
            .with_reply("KR2.1", json!({"score": 3}))
            .with_raw_reply("KR2.2", "not json");

        let reply = oracle.complete("sys", "CRITERION: KR2.1").await.unwrap();
        assert_eq!(reply, r#"{"score":3}"#);

        let reply = oracle.complete("sys", "CRITERION: KR2.2").await.unwrap();
        assert_eq!(reply, "not json");

        let reply = oracle.complete("sys", "CRITERION: KR2.5").await.unwrap();
        assert!(reply.contains("Canned reasoning"));

        assert_eq!(oracle.call_count(), 3);
        assert_eq!(oracle.prompts()[1], "CRITERION: KR2.2");
    }

    #[tokio::test]
    async fn test_default_override() {
        let oracle = CannedOracle::new().with_reply(DEFAULT_KEY, json!({"score": 1}));
        let reply = oracle.complete("sys", "anything").await.unwrap();
        assert_eq!(reply, r#"{"score":1}"#);
    }

    #[tokio::test]
    async fn test_failing() {
        let oracle = CannedOracle::failing(OracleError::Transport("connection refused".into()));
        let err = oracle.complete("sys", "user").await.unwrap_err();
        assert_eq!(err, OracleError::Transport("connection refused".into()));
        assert_eq!(oracle.call_count(), 1);
    }
}
