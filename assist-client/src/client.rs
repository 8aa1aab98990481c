//! The dispatch client and its per-action fallback policy.

use crate::types::{
    AgentProfile, EmailFormData, Opportunity, OpportunityFormData, QuoteFormData, QuoteProse,
    VideoOperation,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Copy returned when the email body action fails.
pub const FALLBACK_EMAIL_BODY: &str = "<p>We were unable to draft this email automatically. \
    Please try again, or start from a short personal note instead.</p>";

/// Copy returned when the rate-change explanation action fails.
pub const FALLBACK_RATE_CHANGE_COPY: &str = "Your premium has been updated to reflect the \
    latest assessment of your policy. Please reach out and we will gladly walk through the \
    details together.";

/// Progress phases reported by [`AssistClient::generate_video_and_wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPhase {
    Starting,
    Generating,
    Ready,
}

#[derive(Debug, Error)]
enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("dispatch failed: {0}")]
    Dispatch(String),

    #[error("response missing result field")]
    MissingResult,

    #[error("failed to decode result: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid attachment: {0}")]
    Attachment(String),
}

/// Typed client for the assist-service dispatch endpoint.
pub struct AssistClient {
    http: Client,
    endpoint: String,
    poll_interval: Duration,
}

impl AssistClient {
    /// Create a client for the given dispatch endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            poll_interval: Duration::from_secs(10),
        }
    }

    /// Override the delay between video operation polls (default 10 seconds).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn post_action(&self, action: &str, payload: Value) -> Result<Value, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "action": action, "payload": payload }))
            .send()
            .await?;
        unwrap_envelope(response).await
    }

    async fn post_action_with_file(
        &self,
        action: &str,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<Value, ClientError> {
        let part = reqwest::multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| ClientError::Attachment(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("action", action.to_string())
            .text("payload", "{}")
            .part("file", part);

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        unwrap_envelope(response).await
    }

    async fn call<T, P>(&self, action: &str, payload: &P) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(payload)?;
        let result = self.post_action(action, payload).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn call_with_file<T: DeserializeOwned>(
        &self,
        action: &str,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<T, ClientError> {
        let result = self
            .post_action_with_file(action, filename, content_type, content)
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    // ------------------------------------------------------------------
    // Email content
    // ------------------------------------------------------------------

    /// Three subject line suggestions; empty on any failure.
    pub async fn generate_subject_lines(&self, form: &EmailFormData) -> Vec<String> {
        or_fallback(
            "generateSubjectLines",
            self.call("generateSubjectLines", form).await,
            Vec::new(),
        )
    }

    /// Three preheader suggestions; empty on any failure.
    pub async fn generate_preheaders(&self, form: &EmailFormData) -> Vec<String> {
        or_fallback(
            "generatePreheaders",
            self.call("generatePreheaders", form).await,
            Vec::new(),
        )
    }

    /// The generated HTML email body; fixed fallback copy on any failure.
    pub async fn generate_email_body(&self, form: &EmailFormData, agent: &AgentProfile) -> String {
        or_fallback(
            "generateEmailBody",
            self.call(
                "generateEmailBody",
                &json!({ "formData": form, "agent": agent }),
            )
            .await,
            FALLBACK_EMAIL_BODY.to_string(),
        )
    }

    // ------------------------------------------------------------------
    // Quote prose
    // ------------------------------------------------------------------

    pub async fn generate_home_quote_prose(&self, form: &QuoteFormData) -> Option<QuoteProse> {
        or_fallback(
            "generateHomeQuoteProse",
            self.call("generateHomeQuoteProse", form).await.map(Some),
            None,
        )
    }

    pub async fn generate_auto_quote_prose(&self, form: &QuoteFormData) -> Option<QuoteProse> {
        or_fallback(
            "generateAutoQuoteProse",
            self.call("generateAutoQuoteProse", form).await.map(Some),
            None,
        )
    }

    // ------------------------------------------------------------------
    // Media
    // ------------------------------------------------------------------

    /// URL of a generated hero image; `None` on any failure.
    pub async fn generate_hero_image(&self, prompt: &str) -> Option<String> {
        or_fallback(
            "generateHeroImage",
            self.call("generateHeroImage", &json!({ "prompt": prompt }))
                .await
                .map(Some),
            None,
        )
    }

    /// Begin video generation; `None` on any failure.
    pub async fn generate_video(&self, prompt: &str) -> Option<VideoOperation> {
        or_fallback(
            "generateVideo",
            self.call("generateVideo", &json!({ "prompt": prompt }))
                .await
                .map(Some),
            None,
        )
    }

    /// Re-fetch the state of a video operation; `None` on any failure.
    pub async fn get_videos_operation(
        &self,
        operation: &VideoOperation,
    ) -> Option<VideoOperation> {
        or_fallback(
            "getVideosOperation",
            self.call("getVideosOperation", &json!({ "operation": operation }))
                .await
                .map(Some),
            None,
        )
    }

    /// Generate a video and poll until it completes, reporting each phase
    /// transition through `on_progress`.
    ///
    /// The loop sleeps for the configured poll interval between polls and has
    /// no attempt bound: it runs until the operation reports done or a call
    /// fails. A URI is only ever returned from a done operation.
    pub async fn generate_video_and_wait<F>(&self, prompt: &str, mut on_progress: F) -> Option<String>
    where
        F: FnMut(VideoPhase),
    {
        on_progress(VideoPhase::Starting);
        let Some(mut operation) = self.generate_video(prompt).await else {
            return None;
        };

        while !operation.done {
            on_progress(VideoPhase::Generating);
            tokio::time::sleep(self.poll_interval).await;
            operation = self.get_videos_operation(&operation).await?;
        }

        on_progress(VideoPhase::Ready);
        let uri = operation
            .response
            .as_ref()
            .and_then(|r| r.generated_videos.first())
            .map(|v| v.video.uri.clone());
        if uri.is_none() {
            tracing::warn!(operation = %operation.name, "Completed video operation carried no media");
        }
        uri
    }

    // ------------------------------------------------------------------
    // Document extraction
    // ------------------------------------------------------------------

    /// An image-generation prompt derived from a document; `None` on failure.
    pub async fn generate_prompt_from_pdf(
        &self,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Option<Value> {
        or_fallback(
            "generatePromptFromPdf",
            self.call_with_file("generatePromptFromPdf", filename, content_type, content)
                .await
                .map(Some),
            None,
        )
    }

    pub async fn extract_quote_from_pdf(
        &self,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Option<Value> {
        or_fallback(
            "extractQuoteFromPdf",
            self.call_with_file("extractQuoteFromPdf", filename, content_type, content)
                .await
                .map(Some),
            None,
        )
    }

    pub async fn extract_auto_quote_from_pdf(
        &self,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Option<Value> {
        or_fallback(
            "extractAutoQuoteFromPdf",
            self.call_with_file("extractAutoQuoteFromPdf", filename, content_type, content)
                .await
                .map(Some),
            None,
        )
    }

    pub async fn extract_renewal_from_pdf(
        &self,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Option<Value> {
        or_fallback(
            "extractRenewalFromPdf",
            self.call_with_file("extractRenewalFromPdf", filename, content_type, content)
                .await
                .map(Some),
            None,
        )
    }

    pub async fn extract_new_policy_from_pdf(
        &self,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Option<Value> {
        or_fallback(
            "extractNewPolicyFromPdf",
            self.call_with_file("extractNewPolicyFromPdf", filename, content_type, content)
                .await
                .map(Some),
            None,
        )
    }

    /// Every cancellation listed in the document; empty on any failure.
    pub async fn extract_cancellations_from_pdf(
        &self,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Vec<Value> {
        or_fallback(
            "extractCancellationsFromPdf",
            self.call_with_file("extractCancellationsFromPdf", filename, content_type, content)
                .await,
            Vec::new(),
        )
    }

    pub async fn extract_receipt_info_from_pdf(
        &self,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Option<Value> {
        or_fallback(
            "extractReceiptInfoFromPdf",
            self.call_with_file("extractReceiptInfoFromPdf", filename, content_type, content)
                .await
                .map(Some),
            None,
        )
    }

    pub async fn extract_receipt_info_from_text(&self, text: &str) -> Option<Value> {
        or_fallback(
            "extractReceiptInfoFromText",
            self.call("extractReceiptInfoFromText", &json!({ "text": text }))
                .await
                .map(Some),
            None,
        )
    }

    pub async fn extract_change_info_from_text(&self, text: &str) -> Option<Value> {
        or_fallback(
            "extractChangeInfoFromText",
            self.call("extractChangeInfoFromText", &json!({ "text": text }))
                .await
                .map(Some),
            None,
        )
    }

    // ------------------------------------------------------------------
    // Insights
    // ------------------------------------------------------------------

    /// Suggested outreach opportunities; empty on any failure.
    pub async fn generate_opportunities(&self, form: &OpportunityFormData) -> Vec<Opportunity> {
        or_fallback(
            "generateOpportunities",
            self.call("generateOpportunities", form).await,
            Vec::new(),
        )
    }

    /// Customer-facing rate change copy; fixed fallback sentence on failure.
    pub async fn generate_rate_change_explanation(
        &self,
        previous_premium: f64,
        new_premium: f64,
    ) -> String {
        or_fallback(
            "generateRateChangeExplanation",
            self.call(
                "generateRateChangeExplanation",
                &json!({
                    "previousPremium": previous_premium,
                    "newPremium": new_premium
                }),
            )
            .await,
            FALLBACK_RATE_CHANGE_COPY.to_string(),
        )
    }
}

/// The explicit fallback rule: any failure maps to the action's default
/// value, and the underlying error goes to the log instead of the caller.
fn or_fallback<T>(action: &str, result: Result<T, ClientError>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(action = %action, error = %e, "Dispatch call failed, returning fallback value");
            fallback
        }
    }
}

async fn unwrap_envelope(response: reqwest::Response) -> Result<Value, ClientError> {
    let status = response.status();
    let body: Value = response.json().await?;
    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown dispatch error")
            .to_string();
        return Err(ClientError::Dispatch(message));
    }
    body.get("result").cloned().ok_or(ClientError::MissingResult)
}
