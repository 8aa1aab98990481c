//! The dispatch entry point.
//!
//! Normalizes both transport encodings, plain JSON body and multipart form
//! data, into the same `(action, payload, file)` triple before routing, and
//! wraps every outcome in the uniform `{result}` / `{error}` envelope.

use crate::config::ProviderKind;
use crate::dispatch::{self, DispatchError};
use crate::models::{ActionRequest, FileAttachment, DEFAULT_CONTENT_TYPE};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::time::Instant;
use validator::Validate;

pub async fn dispatch_action(State(state): State<AppState>, req: Request) -> Response {
    let started = Instant::now();

    let (action, payload, file) = match normalize_request(req).await {
        Ok(triple) => triple,
        Err(e) => {
            tracing::error!(error = %e, "Failed to normalize dispatch request");
            metrics::record_action("invalid", "error", started.elapsed().as_secs_f64());
            return e.into_response();
        }
    };

    tracing::info!(action = %action, has_file = file.is_some(), "Dispatching action");

    match dispatch::run(&state, &action, payload, file).await {
        Ok(result) => {
            metrics::record_action(&action, "ok", started.elapsed().as_secs_f64());
            (StatusCode::OK, Json(json!({ "result": result }))).into_response()
        }
        Err(e) => {
            tracing::error!(action = %action, error = %e, "Action failed");
            if let DispatchError::Provider(provider_error) = &e {
                let provider = match state.config.provider {
                    ProviderKind::Gemini => "gemini",
                    ProviderKind::Mock => "mock",
                };
                metrics::record_provider_error(provider, provider_error.kind());
            }
            metrics::record_action(&action, "error", started.elapsed().as_secs_f64());
            e.into_response()
        }
    }
}

/// CORS preflight. The cors layer attaches the actual headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Normalize either transport encoding into `(action, payload, file)`.
async fn normalize_request(
    req: Request,
) -> Result<(String, Value, Option<FileAttachment>), DispatchError> {
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let (request, file) = if is_multipart {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| DispatchError::BadRequest(format!("invalid multipart request: {e}")))?;
        read_multipart(multipart).await?
    } else {
        let Json(request) = Json::<ActionRequest>::from_request(req, &())
            .await
            .map_err(|e| DispatchError::BadRequest(format!("invalid JSON body: {e}")))?;
        (request, None)
    };

    request
        .validate()
        .map_err(|e| DispatchError::BadRequest(e.to_string()))?;

    Ok((request.action, request.payload, file))
}

async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(ActionRequest, Option<FileAttachment>), DispatchError> {
    let mut action = String::new();
    let mut payload = Value::Object(serde_json::Map::new());
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DispatchError::BadRequest(format!("invalid multipart field: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "action" => {
                action = field
                    .text()
                    .await
                    .map_err(|e| DispatchError::BadRequest(format!("invalid action field: {e}")))?;
            }
            "payload" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| DispatchError::BadRequest(format!("invalid payload field: {e}")))?;
                payload = serde_json::from_str(&raw)
                    .map_err(|e| DispatchError::BadRequest(format!("payload is not valid JSON: {e}")))?;
            }
            // Accept a single `file` part or the first of a `files` array.
            "file" | "files" => {
                if file.is_some() {
                    continue;
                }
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| DispatchError::BadRequest(format!("failed to read file: {e}")))?;
                file = Some(FileAttachment {
                    content: bytes.to_vec(),
                    content_type,
                    filename,
                });
            }
            _ => {}
        }
    }

    Ok((ActionRequest { action, payload }, file))
}
