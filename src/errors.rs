// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::otp_token::TokenError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("Invalid recipient address")]
    InvalidRecipient,

    #[error("Invalid US phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MongoDB(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string()),
            AppError::InvalidRecipient => (StatusCode::BAD_REQUEST, "Invalid email format".to_string()),
            AppError::InvalidPhoneNumber(_) => (StatusCode::BAD_REQUEST, "Invalid phone number".to_string()),
            AppError::Token(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::DeliveryFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Delivery failed".to_string()),
            AppError::ConfigurationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error".to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

// Helper conversion functions
impl AppError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        AppError::DeliveryFailed(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
