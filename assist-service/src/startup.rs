//! Application startup and lifecycle management.

use crate::config::{AssistConfig, ProviderKind};
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::placeholder::{PlaceholderImageProvider, PlaceholderVideoProvider};
use crate::services::providers::{ImageProvider, TextProvider, VideoProvider};
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AssistConfig,
    pub text_provider: Arc<dyn TextProvider>,
    pub document_provider: Arc<dyn TextProvider>,
    pub image_provider: Arc<dyn ImageProvider>,
    pub video_provider: Arc<dyn VideoProvider>,
}

/// Build the HTTP router.
///
/// CORS headers are attached to every response; the dispatch route answers
/// POST and OPTIONS only, so other methods get a 405 from axum's routing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/",
            post(handlers::dispatch::dispatch_action).options(handlers::dispatch::preflight),
        )
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AssistConfig) -> Result<Self, AppError> {
        let (text_provider, document_provider): (Arc<dyn TextProvider>, Arc<dyn TextProvider>) =
            match config.provider {
                ProviderKind::Mock => (
                    Arc::new(MockTextProvider::new(true)),
                    Arc::new(MockTextProvider::new(true)),
                ),
                ProviderKind::Gemini => (
                    Arc::new(GeminiTextProvider::new(GeminiConfig {
                        api_key: config.google.api_key.clone(),
                        model: config.models.text_model.clone(),
                    })),
                    Arc::new(GeminiTextProvider::new(GeminiConfig {
                        api_key: config.google.api_key.clone(),
                        model: config.models.document_model.clone(),
                    })),
                ),
            };

        tracing::info!(
            provider = ?config.provider,
            text_model = %config.models.text_model,
            document_model = %config.models.document_model,
            "Initialized text providers"
        );

        let state = AppState {
            config: config.clone(),
            text_provider,
            document_provider,
            image_provider: Arc::new(PlaceholderImageProvider::new()),
            video_provider: Arc::new(PlaceholderVideoProvider::new()),
        };

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("assist-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
