//! Wire types shared with the dispatcher.
//!
//! Payload structs serialize in the camelCase shape the dispatcher's prompt
//! templates read; result structs mirror the per-action result shapes.

use serde::{Deserialize, Serialize};

/// Form data for email content actions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFormData {
    pub campaign_name: String,
    pub email_type: String,
    pub recipient_name: String,
    pub policy_type: String,
    pub agency_name: String,
    pub tone: String,
    pub custom_instructions: String,
}

/// The sending agent's signature details for email bodies.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub name: String,
    pub agency_name: String,
    pub phone: String,
    pub email: String,
}

/// Form data for quote prose actions. Home quotes read `property_address`,
/// auto quotes read `vehicle`; the other field may stay empty.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFormData {
    pub customer_name: String,
    pub property_address: String,
    pub vehicle: String,
    pub premium: String,
    pub effective_date: String,
    pub custom_instructions: String,
}

/// Personalized prose for a quote email.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteProse {
    pub greeting: String,
    pub intro: String,
    pub cta_text: String,
}

/// Form data for the opportunities action.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityFormData {
    pub customer_name: String,
    pub current_policies: String,
    pub renewal_date: String,
    pub life_events: String,
    pub custom_instructions: String,
}

/// One suggested outreach opportunity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A video generation operation; passed back verbatim on every poll.
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
