use serde::{Deserialize, Serialize};

/// A long-running video generation operation in the provider's wire shape.
///
/// The operation is never persisted server-side; callers hand the full value
/// back on every poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<VideoOperationResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperationResponse {
    pub generated_videos: Vec<GeneratedVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    pub video: VideoFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFile {
    pub uri: String,
}

impl VideoOperation {
    /// The URI of the first generated video, once the operation is done.
    pub fn first_video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generated_videos
            .first()
            .map(|v| v.video.uri.as_str())
    }
}
