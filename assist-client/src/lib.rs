//! assist-client: typed facade over the assist-service dispatch endpoint.
//!
//! One async function per dispatcher action. Every function maps any failure
//! (network, error envelope, result decoding) to a fixed per-action fallback
//! value, so callers see degraded results instead of errors. The underlying
//! error is logged at `warn` level for observability.

mod client;
mod types;

pub use client::{AssistClient, VideoPhase, FALLBACK_EMAIL_BODY, FALLBACK_RATE_CHANGE_COPY};
pub use types::{
    AgentProfile, EmailFormData, GeneratedVideo, Opportunity, OpportunityFormData, Priority,
    QuoteFormData, QuoteProse, VideoFile, VideoOperation, VideoOperationResponse,
};
