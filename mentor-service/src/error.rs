use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::providers::ProviderError;

/// Fixed advisory returned when the model's output fails strict JSON parsing.
/// The raw model text is never part of the client-visible payload.
pub const INVALID_MODEL_OUTPUT_ADVISORY: &str =
    "Model returned invalid JSON; the response was discarded. This request can be retried.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Model output was not valid JSON")]
    InvalidModelOutput,

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let (status, error_message) = match self {
            AppError::InvalidModelOutput => (
                StatusCode::BAD_REQUEST,
                INVALID_MODEL_OUTPUT_ADVISORY.to_string(),
            ),
            AppError::Provider(err) => {
                tracing::error!(error = %err, "Provider call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
