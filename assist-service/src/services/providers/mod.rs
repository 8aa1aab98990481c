//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for the generative
//! backends, allowing easy swapping between the real Gemini client, the
//! deterministic media placeholders, and mocks.

pub mod gemini;
pub mod mock;
pub mod placeholder;

use crate::models::{FileAttachment, VideoOperation};
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::InvalidRequest(_) => "invalid_request",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Trait for text/document completion providers (e.g., Gemini).
///
/// An attachment, when present, is sent as an inline-data part alongside the
/// prompt text in a single model request.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate one completion for the prompt.
    async fn generate(
        &self,
        prompt: &str,
        attachment: Option<&FileAttachment>,
    ) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// Trait for image generation providers.
///
/// Returns the URL of the generated image.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Trait for long-running video generation providers.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Begin generating a video; the returned operation is not yet done.
    async fn start(&self, prompt: &str) -> Result<VideoOperation, ProviderError>;

    /// Re-fetch the state of a previously started operation.
    async fn poll(&self, operation: VideoOperation) -> Result<VideoOperation, ProviderError>;
}
