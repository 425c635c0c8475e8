//! Application startup and lifecycle management.

use crate::config::MentorConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::MentorEngine;
use crate::services::providers::TextProvider;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use axum::{
    Router,
    routing::{get, post},
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Built once at startup, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: MentorConfig,
    pub provider: Arc<dyn TextProvider>,
    pub mentor: Arc<MentorEngine>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: MentorConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn TextProvider> = if config.google.use_mock {
            tracing::info!("Using mock text provider");
            Arc::new(MockTextProvider::new(true))
        } else {
            Arc::new(GeminiTextProvider::new(GeminiConfig {
                api_key: config.google.api_key.clone(),
                api_base: config.google.api_base.clone(),
                model: config.models.text_model.clone(),
            }))
        };

        tracing::info!(
            model = %config.models.text_model,
            "Initialized text provider"
        );

        let mentor = Arc::new(MentorEngine::new(
            provider.clone(),
            config.models.text_model.clone(),
        ));

        let state = AppState {
            config: config.clone(),
            provider,
            mentor,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .route(
                "/psychometrics/career-mentor",
                post(handlers::career_mentor),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
