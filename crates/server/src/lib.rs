//! Call QC Server
//!
//! HTTP endpoints and the command-line front end for call evaluation.

pub mod http;
pub mod state;
pub mod telemetry;

pub use http::create_router;
pub use state::AppState;
pub use telemetry::init_tracing;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] call_qc_config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) | ServerError::Json(_) => StatusCode::BAD_REQUEST,
            ServerError::Config(_) | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from(&self);
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Split an evaluation-dataset item into its call document and `dataset_id`
///
/// Items shaped `{dataset_id, input: {...}}` yield the inner object; anything
/// else is returned as the call document itself.
pub fn unwrap_dataset_item(payload: &Value) -> (&Value, Option<&Value>) {
    let dataset_id = payload.get("dataset_id").filter(|id| !id.is_null());
    match payload.get("input") {
        Some(inner @ Value::Object(_)) => (inner, dataset_id),
        _ => (payload, dataset_id),
    }
}

/// Attach `dataset_id` next to an output document when one was given
pub fn wrap_output(document: Value, dataset_id: Option<&Value>) -> Value {
    match dataset_id {
        Some(id) => serde_json::json!({ "dataset_id": id, "output": document }),
        None => document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_dataset_item() {
        let item = json!({"dataset_id": "d-7", "input": {"call_id": "C1", "segments": []}});
        let (inner, id) = unwrap_dataset_item(&item);
        assert_eq!(inner["call_id"], "C1");
        assert_eq!(id, Some(&json!("d-7")));

        let plain = json!({"call_id": "C2", "segments": []});
        let (inner, id) = unwrap_dataset_item(&plain);
        assert_eq!(inner, &plain);
        assert!(id.is_none());

        let bad_input = json!({"dataset_id": 3, "input": "nope"});
        let (inner, id) = unwrap_dataset_item(&bad_input);
        assert_eq!(inner, &bad_input);
        assert_eq!(id, Some(&json!(3)));
    }

    #[test]
    fn test_error_status() {
        let err = ServerError::InvalidRequest("unknown mode".into());
        assert_eq!(StatusCode::from(&err), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid request: unknown mode");
    }
}
