//! Oracle trait
//!
//! An oracle is any text-completion backend (hosted model, local server,
//! canned responses in tests). The scoring pipeline only relies on this
//! single capability; response parsing and validation happen on our side.

use async_trait::async_trait;

use crate::OracleError;

/// Single-capability completion interface
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Return raw completion text for a system instruction and a user prompt
    async fn complete(&self, system: &str, user: &str) -> Result<String, OracleError>;

    /// Backend name, used in logs
    fn name(&self) -> &str;
}
