//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use crate::models::FileAttachment;
use async_trait::async_trait;

/// Mock text provider for testing.
///
/// With a canned response it returns that verbatim; otherwise it echoes a
/// completion shaped to pass the extraction layer for the asking prompt.
pub struct MockTextProvider {
    enabled: bool,
    canned: Option<String>,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            canned: None,
        }
    }

    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            enabled: true,
            canned: Some(text.into()),
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _attachment: Option<&FileAttachment>,
    ) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        if let Some(canned) = &self.canned {
            return Ok(canned.clone());
        }

        if prompt.contains("JSON array") {
            Ok("```json\n[\"First sample option\", \"Second sample option\", \"Third sample option\"]\n```".to_string())
        } else if prompt.contains("JSON") {
            Ok("```json\n{\"mock\": true}\n```".to_string())
        } else {
            Ok(format!("Mock response for: {}", prompt))
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}
