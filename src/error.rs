//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::errors::{ConfigError, QuoteError, ValidationError};
use crate::pricing::responses::PricingErrorResponse;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Quote not found")]
    NotFound,

    #[error(transparent)]
    Pricing(#[from] QuoteError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("QR code error: {0}")]
    QrCode(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Message formatting error: {0}")]
    Message(#[from] std::fmt::Error),

    #[error("Share link error: {0}")]
    ShareLink(#[from] url::ParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Pricing(err.into())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Pricing(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Pricing(e) => {
                tracing::debug!("Rejected pricing request: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.error_type(), e.to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "template_error",
                    "Template error".to_string(),
                )
            }
            AppError::QrCode(msg) => {
                tracing::error!("QR code error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "qr_code_error",
                    "Could not render QR code".to_string(),
                )
            }
            AppError::Pdf(msg) => {
                tracing::error!("PDF error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "pdf_error",
                    "Could not render PDF".to_string(),
                )
            }
            AppError::Message(e) => {
                tracing::error!("Message formatting error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "message_error",
                    "Could not format message".to_string(),
                )
            }
            AppError::ShareLink(e) => {
                tracing::error!("Share link error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "share_link_error",
                    "Could not build share link".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal error".to_string(),
                )
            }
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
