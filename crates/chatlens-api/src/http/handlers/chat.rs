//! Chat endpoint.
//!
//! POST /api/chat
//!
//! Request:  `{ "message": "..." }`
//! Response: `{ "response": Message, "should_show_viz": bool, "analysis_data": object|null }`
//!
//! Completion failures still answer 200; their diagnostic text is the reply.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;
use tracing::{Instrument, info_span};

use chatlens_core::session::ChatOutcome;
use chatlens_types::error::ValidationError;

use crate::http::error::{ApiError, AppError, RequestMeta};
use crate::state::AppState;

/// Pull the required `message` string out of the request body.
fn message_text(body: &Value) -> Result<&str, ValidationError> {
    match body.get("message") {
        None | Some(Value::Null) => Err(ValidationError::MissingField("message".to_string())),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ValidationError::InvalidField {
            field: "message".to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}

/// POST /api/chat - run one chat turn.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatOutcome>, ApiError> {
    let meta = RequestMeta::start();
    let Json(body) = payload.map_err(|e| meta.reject(AppError::BadRequest(e.body_text())))?;
    let text = message_text(&body).map_err(|e| meta.reject(e))?;

    let request_id = meta.request_id;
    let span = info_span!("chat.request", request_id = %request_id);

    let outcome = state
        .orchestrator
        .handle_message(text)
        .instrument(span)
        .await;

    tracing::debug!(
        %request_id,
        elapsed_ms = meta.started.elapsed().as_millis() as u64,
        "Chat request served"
    );

    Ok(Json(outcome))
}
