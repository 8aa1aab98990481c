//! Fallback behavior tests for the client facade.
//!
//! With no dispatcher reachable, every call must return its per-action
//! default instead of an error.
//! Run with: cargo test -p assist-client --test fallback_test

use assist_client::{
    AssistClient, EmailFormData, OpportunityFormData, QuoteFormData, VideoPhase,
    FALLBACK_EMAIL_BODY, FALLBACK_RATE_CHANGE_COPY,
};
use std::time::Duration;

/// Nothing listens on this port; requests fail immediately with a
/// connection error.
fn unreachable_client() -> AssistClient {
    AssistClient::new("http://127.0.0.1:9/").with_poll_interval(Duration::from_millis(10))
}

#[tokio::test]
async fn list_actions_fall_back_to_empty() {
    let client = unreachable_client();

    assert!(client
        .generate_subject_lines(&EmailFormData::default())
        .await
        .is_empty());
    assert!(client
        .generate_preheaders(&EmailFormData::default())
        .await
        .is_empty());
    assert!(client
        .generate_opportunities(&OpportunityFormData::default())
        .await
        .is_empty());
    assert!(client
        .extract_cancellations_from_pdf("c.pdf", "application/pdf", b"%PDF-1.4".to_vec())
        .await
        .is_empty());
}

#[tokio::test]
async fn option_actions_fall_back_to_none() {
    let client = unreachable_client();

    assert!(client
        .generate_home_quote_prose(&QuoteFormData::default())
        .await
        .is_none());
    assert!(client.generate_hero_image("a lighthouse").await.is_none());
    assert!(client
        .extract_receipt_info_from_text("Paid $120 on June 3")
        .await
        .is_none());
    assert!(client
        .extract_quote_from_pdf("q.pdf", "application/pdf", b"%PDF-1.4".to_vec())
        .await
        .is_none());
}

#[tokio::test]
async fn string_actions_fall_back_to_fixed_copy() {
    let client = unreachable_client();

    let body = client
        .generate_email_body(&EmailFormData::default(), &Default::default())
        .await;
    assert_eq!(body, FALLBACK_EMAIL_BODY);

    let copy = client.generate_rate_change_explanation(1200.0, 1350.0).await;
    assert_eq!(copy, FALLBACK_RATE_CHANGE_COPY);
}

#[tokio::test]
async fn video_wait_reports_start_then_gives_up() {
    let client = unreachable_client();

    let mut phases = Vec::new();
    let uri = client
        .generate_video_and_wait("a harbor at dawn", |phase| phases.push(phase))
        .await;

    assert!(uri.is_none());
    assert_eq!(phases, vec![VideoPhase::Starting]);
}
