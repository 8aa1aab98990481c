//! Client-to-dispatcher workflow tests.
//!
//! Each test spawns the service with a canned model completion and verifies
//! both the happy path and the facade's silent-fallback policy.

use assist_client::{
    AssistClient, EmailFormData, OpportunityFormData, Priority, QuoteFormData,
    FALLBACK_EMAIL_BODY, FALLBACK_RATE_CHANGE_COPY,
};

/// Test: subject lines round-trip from fenced JSON to a typed list.
#[tokio::test]
async fn subject_lines_round_trip() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion(
        "```json\n[\"Spring savings inside\", \"Your renewal is due\", \"A quick question\"]\n```",
    )
    .await;
    let client = AssistClient::new(endpoint);

    let form = EmailFormData {
        campaign_name: "Spring Renewal".to_string(),
        recipient_name: "Jordan".to_string(),
        ..Default::default()
    };
    let lines = client.generate_subject_lines(&form).await;

    assert_eq!(
        lines,
        vec![
            "Spring savings inside",
            "Your renewal is due",
            "A quick question"
        ]
    );
}

/// Test: the facade downgrades a model failure to an empty list.
#[tokio::test]
async fn subject_lines_fall_back_when_the_model_fails() {
    let endpoint = workflow_tests::spawn_dispatcher_with_failing_model().await;
    let client = AssistClient::new(endpoint);

    let lines = client.generate_subject_lines(&EmailFormData::default()).await;
    assert!(lines.is_empty());
}

/// Test: email body comes back as the cleaned HTML fragment.
#[tokio::test]
async fn email_body_is_cleaned_html() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion(
        "```html\n<p>Hi Jordan,</p>\n<p>Your renewal is coming up.</p>\n```",
    )
    .await;
    let client = AssistClient::new(endpoint);

    let body = client
        .generate_email_body(&EmailFormData::default(), &Default::default())
        .await;
    assert_eq!(body, "<p>Hi Jordan,</p>\n<p>Your renewal is coming up.</p>");
}

/// Test: an unparseable completion degrades to the fixed fallback copy.
#[tokio::test]
async fn quote_prose_falls_back_to_none_on_garbage_output() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion(
        "I am sorry, I cannot help with that request.",
    )
    .await;
    let client = AssistClient::new(endpoint);

    let prose = client
        .generate_home_quote_prose(&QuoteFormData::default())
        .await;
    assert!(prose.is_none());
}

/// Test: quote prose parses into its typed shape.
#[tokio::test]
async fn quote_prose_round_trip() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion(
        "```json\n{\"greeting\": \"Hi Riley,\", \"intro\": \"Your home quote is ready.\", \"ctaText\": \"View your quote\"}\n```",
    )
    .await;
    let client = AssistClient::new(endpoint);

    let prose = client
        .generate_home_quote_prose(&QuoteFormData {
            customer_name: "Riley Chen".to_string(),
            ..Default::default()
        })
        .await
        .expect("prose");

    assert_eq!(prose.greeting, "Hi Riley,");
    assert_eq!(prose.cta_text, "View your quote");
}

/// Test: cancellations extraction carries a multipart upload end to end.
#[tokio::test]
async fn cancellations_flow_through_multipart_upload() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion(
        "```json\n[{\"customerName\": \"A\"}, {\"customerName\": \"B\"}, {\"customerName\": \"C\"}]\n```",
    )
    .await;
    let client = AssistClient::new(endpoint);

    let cancellations = client
        .extract_cancellations_from_pdf(
            "cancellations.pdf",
            "application/pdf",
            b"%PDF-1.4 fake".to_vec(),
        )
        .await;
    assert_eq!(cancellations.len(), 3);
}

/// Test: a document with no cancellations yields an empty list, not an error.
#[tokio::test]
async fn cancellations_can_be_empty() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion("```json\n[]\n```").await;
    let client = AssistClient::new(endpoint);

    let cancellations = client
        .extract_cancellations_from_pdf(
            "cancellations.pdf",
            "application/pdf",
            b"%PDF-1.4 fake".to_vec(),
        )
        .await;
    assert!(cancellations.is_empty());
}

/// Test: opportunities parse including the priority scale.
#[tokio::test]
async fn opportunities_round_trip() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion(
        "```json\n[{\"title\": \"Bundle home and auto\", \"description\": \"Savings available\", \"priority\": \"high\"}]\n```",
    )
    .await;
    let client = AssistClient::new(endpoint);

    let opportunities = client
        .generate_opportunities(&OpportunityFormData::default())
        .await;
    assert_eq!(opportunities.len(), 1);
    assert_eq!(opportunities[0].priority, Priority::High);
}

/// Test: rate change copy arrives with commentary stripped, and falls back
/// to fixed copy on failure.
#[tokio::test]
async fn rate_change_explanation_flows_and_falls_back() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion(
        "Here's something you can send:\nYour premium reflects updated repair costs in your area.",
    )
    .await;
    let client = AssistClient::new(endpoint);
    let copy = client.generate_rate_change_explanation(1200.0, 1350.0).await;
    assert_eq!(copy, "Your premium reflects updated repair costs in your area.");

    let endpoint = workflow_tests::spawn_dispatcher_with_failing_model().await;
    let client = AssistClient::new(endpoint);
    let copy = client.generate_rate_change_explanation(1200.0, 1350.0).await;
    assert_eq!(copy, FALLBACK_RATE_CHANGE_COPY);
}

/// Test: email body fallback copy is served when the model fails.
#[tokio::test]
async fn email_body_falls_back_to_fixed_copy() {
    let endpoint = workflow_tests::spawn_dispatcher_with_failing_model().await;
    let client = AssistClient::new(endpoint);

    let body = client
        .generate_email_body(&EmailFormData::default(), &Default::default())
        .await;
    assert_eq!(body, FALLBACK_EMAIL_BODY);
}

/// Test: receipt text extraction returns the parsed object.
#[tokio::test]
async fn receipt_info_from_text_round_trip() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion(
        "```json\n{\"customerName\": \"Riley Chen\", \"amount\": \"$120.00\"}\n```",
    )
    .await;
    let client = AssistClient::new(endpoint);

    let receipt = client
        .extract_receipt_info_from_text("Paid $120.00 on June 3 by card")
        .await
        .expect("receipt");
    assert_eq!(receipt["customerName"], "Riley Chen");
}
