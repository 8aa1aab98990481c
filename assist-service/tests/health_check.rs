//! Integration tests for assist-service over a real socket.
//!
//! These use the mock provider; no API key is required.
//! Run with: cargo test -p assist-service --test health_check

use assist_service::config::AssistConfig;
use assist_service::startup::Application;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    // Set test environment variables
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0"); // Random port
    std::env::set_var("GOOGLE_API_KEY", "test-api-key");
    std::env::set_var("ASSIST_PROVIDER", "mock");

    let config = AssistConfig::load().expect("Failed to load config");
    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "assist-service");
}

#[tokio::test]
async fn dispatch_works_over_a_real_socket() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/", port))
        .json(&json!({
            "action": "generateSubjectLines",
            "payload": {"campaignName": "Spring Renewal"}
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let lines = body["result"].as_array().expect("array result");
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn metrics_endpoint_reports_dispatches() {
    let port = spawn_app().await;
    let client = Client::new();

    client
        .post(format!("http://localhost:{}/", port))
        .json(&json!({"action": "generateHeroImage", "payload": {"prompt": "harbor"}}))
        .send()
        .await
        .expect("Failed to send request");

    let metrics = client
        .get(format!("http://localhost:{}/metrics", port))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(metrics.contains("action_requests_total"));
}
