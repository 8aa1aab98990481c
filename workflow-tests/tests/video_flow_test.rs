//! Video generation workflow tests.
//!
//! The dispatcher's video provider is a placeholder: starting yields a
//! not-done operation, and the first poll completes it with a fixed media
//! location. The client's poll loop must still behave like a real one.

use assist_client::{AssistClient, VideoPhase};
use assist_service::services::providers::placeholder::PLACEHOLDER_VIDEO_URI;
use std::time::Duration;

/// Test: the poll loop performs a delayed re-poll and only then returns the
/// URI of the completed operation.
#[tokio::test]
async fn video_wait_polls_at_least_once_before_returning_a_uri() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion("unused").await;
    let client =
        AssistClient::new(endpoint).with_poll_interval(Duration::from_millis(20));

    let mut phases = Vec::new();
    let uri = client
        .generate_video_and_wait("a drone shot of a harbor at dawn", |phase| {
            phases.push(phase)
        })
        .await;

    assert_eq!(uri.as_deref(), Some(PLACEHOLDER_VIDEO_URI));
    // Starting, at least one Generating while done=false, then Ready.
    assert_eq!(phases.first(), Some(&VideoPhase::Starting));
    assert!(phases.contains(&VideoPhase::Generating));
    assert_eq!(phases.last(), Some(&VideoPhase::Ready));
}

/// Test: the one-shot start/poll pair exposes the raw operation lifecycle.
#[tokio::test]
async fn start_and_poll_expose_the_operation_lifecycle() {
    let endpoint = workflow_tests::spawn_dispatcher_with_completion("unused").await;
    let client = AssistClient::new(endpoint);

    let started = client
        .generate_video("a drone shot of a harbor at dawn")
        .await
        .expect("start operation");
    assert!(!started.done);
    assert!(started.response.is_none());

    let polled = client
        .get_videos_operation(&started)
        .await
        .expect("poll operation");
    assert!(polled.done);
    assert_eq!(polled.name, started.name);
    assert_eq!(
        polled
            .response
            .expect("response")
            .generated_videos
            .first()
            .map(|v| v.video.uri.clone())
            .as_deref(),
        Some(PLACEHOLDER_VIDEO_URI)
    );
}
