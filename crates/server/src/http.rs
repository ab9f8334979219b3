//! HTTP Endpoints
//!
//! REST API for call evaluation.

use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use call_qc_core::ScoringMode;
use serde::Deserialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{unwrap_dataset_item, wrap_output, ServerError};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/evaluate", post(evaluate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Evaluate query parameters
#[derive(Debug, Deserialize)]
struct EvaluateParams {
    mode: Option<String>,
}

/// Score one call, plain or wrapped as a dataset item
async fn evaluate(
    State(state): State<AppState>,
    Query(params): Query<EvaluateParams>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ServerError> {
    let mode = match params.mode.as_deref() {
        Some(raw) => raw
            .parse::<ScoringMode>()
            .map_err(|e| ServerError::InvalidRequest(e.to_string()))?,
        None => state.default_mode,
    };

    let (call, dataset_id) = unwrap_dataset_item(&payload);
    let evaluation = state.evaluator.evaluate_value(call, mode).await;

    Ok(Json(wrap_output(evaluation.to_document(), dataset_id)))
}

/// Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "mode": state.default_mode,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use call_qc_config::Settings;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Settings::default());
        let _ = create_router(state);
    }
}
