//! Request-scoped data types for the dispatcher.

mod video;

pub use video::{GeneratedVideo, VideoFile, VideoOperation, VideoOperationResponse};

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Content type assumed for uploads that do not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// The normalized dispatch request, identical for JSON and multipart
/// transports.
#[derive(Debug, Deserialize, Validate)]
pub struct ActionRequest {
    #[validate(length(min = 1, message = "action is required"))]
    pub action: String,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A binary document attached to a multipart dispatch request.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    pub content: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}
