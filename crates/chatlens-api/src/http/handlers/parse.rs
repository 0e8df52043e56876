//! Data-to-text endpoint.
//!
//! POST /api/parse
//!
//! Request:  `{ "data": list|mapping, "template"?: "...", "separator"?: "..." }`
//! Response: `{ "parsed_data": "..." }`

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use chatlens_core::template::{DEFAULT_SEPARATOR, render_data};
use chatlens_types::error::ValidationError;

use crate::http::error::{ApiError, AppError, RequestMeta};

/// Template applied when the request does not carry one.
pub const DEFAULT_TEMPLATE: &str = "{text}";

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Request body for the parse endpoint.
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default, deserialize_with = "present")]
    pub data: Option<Value>,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub parsed_data: String,
}

/// POST /api/parse - render records through a template.
pub async fn parse(
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ParseResponse>, ApiError> {
    let meta = RequestMeta::start();
    let Json(request) = payload.map_err(|e| meta.reject(AppError::BadRequest(e.body_text())))?;

    let Some(data) = request.data else {
        return Err(meta.reject(ValidationError::MissingField("data".to_string())));
    };

    let parsed_data = render_data(&request.template, &data, &request.separator)
        .map_err(|e| meta.reject(e))?;
    Ok(Json(ParseResponse { parsed_data }))
}
