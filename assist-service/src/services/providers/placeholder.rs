//! Deterministic placeholder providers for image and video generation.
//!
//! The text backend has no native image or video capability in this design,
//! so these stand behind the same provider traits a real integration would
//! implement. Their successes are genuine results (placeholder media), not
//! failure paths.

use super::{ImageProvider, ProviderError, VideoProvider};
use crate::models::{GeneratedVideo, VideoFile, VideoOperation, VideoOperationResponse};
use async_trait::async_trait;

/// Media location reported for every completed placeholder operation.
pub const PLACEHOLDER_VIDEO_URI: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4";

/// Image provider that returns a placeholder URL embedding the prompt.
pub struct PlaceholderImageProvider;

impl PlaceholderImageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlaceholderImageProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for PlaceholderImageProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let query = serde_urlencoded::to_string([("text", prompt)])
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        tracing::debug!(prompt_len = prompt.len(), "Returning placeholder hero image");
        Ok(format!("https://placehold.co/1280x720/png?{}", query))
    }
}

/// Video provider that fabricates operations instead of calling a backend.
///
/// `start` hands out a not-yet-done operation; `poll` completes it on the
/// first re-fetch with the fixed placeholder media location.
pub struct PlaceholderVideoProvider;

impl PlaceholderVideoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlaceholderVideoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoProvider for PlaceholderVideoProvider {
    async fn start(&self, prompt: &str) -> Result<VideoOperation, ProviderError> {
        let name = format!("operations/videogen-{}", uuid::Uuid::new_v4());
        tracing::debug!(operation = %name, prompt_len = prompt.len(), "Fabricated video operation");

        Ok(VideoOperation {
            name,
            done: false,
            response: None,
        })
    }

    async fn poll(&self, operation: VideoOperation) -> Result<VideoOperation, ProviderError> {
        Ok(VideoOperation {
            name: operation.name,
            done: true,
            response: Some(VideoOperationResponse {
                generated_videos: vec![GeneratedVideo {
                    video: VideoFile {
                        uri: PLACEHOLDER_VIDEO_URI.to_string(),
                    },
                }],
            }),
        })
    }
}
