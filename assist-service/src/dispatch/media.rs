//! Media actions: hero image URL and the video generation operation pair.
//!
//! Both back onto placeholder providers; see `services::providers::placeholder`.

use super::{text_field, DispatchError};
use crate::models::VideoOperation;
use crate::startup::AppState;
use serde_json::Value;

pub async fn hero_image(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let url = state
        .image_provider
        .generate(text_field(payload, "prompt"))
        .await?;
    Ok(Value::String(url))
}

pub async fn start_video(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let operation = state
        .video_provider
        .start(text_field(payload, "prompt"))
        .await?;
    Ok(serde_json::to_value(operation)?)
}

pub async fn poll_video(state: &AppState, payload: &Value) -> Result<Value, DispatchError> {
    let operation = payload
        .get("operation")
        .cloned()
        .ok_or_else(|| DispatchError::BadRequest("operation is required".to_string()))?;
    let operation: VideoOperation = serde_json::from_value(operation)
        .map_err(|e| DispatchError::BadRequest(format!("invalid operation: {e}")))?;

    let polled = state.video_provider.poll(operation).await?;
    Ok(serde_json::to_value(polled)?)
}
