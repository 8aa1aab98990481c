//! Shared helpers for end-to-end workflow tests.
//!
//! Each test spawns an in-process assist-service wired to a mock text
//! provider, then drives it through the assist-client facade exactly as a
//! real caller would.

use assist_service::config::{AssistConfig, GoogleConfig, ModelConfig, ProviderKind};
use assist_service::services::providers::mock::MockTextProvider;
use assist_service::services::providers::placeholder::{
    PlaceholderImageProvider, PlaceholderVideoProvider,
};
use assist_service::services::providers::TextProvider;
use assist_service::startup::{build_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;

fn test_config() -> AssistConfig {
    AssistConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "info".to_string(),
        },
        models: ModelConfig {
            text_model: "gemini-2.0-flash".to_string(),
            document_model: "gemini-2.0-flash".to_string(),
        },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
        },
        provider: ProviderKind::Mock,
    }
}

/// Spawn a dispatcher backed by the given text provider; returns the
/// dispatch endpoint URL.
pub async fn spawn_dispatcher_with(provider: Arc<dyn TextProvider>) -> String {
    let state = AppState {
        config: test_config(),
        text_provider: provider.clone(),
        document_provider: provider,
        image_provider: Arc::new(PlaceholderImageProvider::new()),
        video_provider: Arc::new(PlaceholderVideoProvider::new()),
    };
    let router = build_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let port = listener.local_addr().expect("local addr").port();

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://127.0.0.1:{port}/")
}

/// Spawn a dispatcher whose model always returns `completion`.
pub async fn spawn_dispatcher_with_completion(completion: &str) -> String {
    spawn_dispatcher_with(Arc::new(MockTextProvider::with_response(completion))).await
}

/// Spawn a dispatcher whose model fails every call.
pub async fn spawn_dispatcher_with_failing_model() -> String {
    spawn_dispatcher_with(Arc::new(MockTextProvider::new(false))).await
}
