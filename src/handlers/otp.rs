use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;
use crate::state::AppState;

// Request DTOs — both endpoints accept POST JSON bodies and GET query params.
#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub otp: String,
}

// Response DTOs
#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
}

// 1. Request OTP
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Response {
    send_otp_inner(state, req).await
}

pub async fn send_otp_query(
    State(state): State<AppState>,
    Query(req): Query<SendOtpRequest>,
) -> Response {
    send_otp_inner(state, req).await
}

async fn send_otp_inner(state: AppState, req: SendOtpRequest) -> Response {
    let email = req.email.trim();
    if email.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SendOtpResponse {
                success: false,
                token: None,
                message: "Missing email".to_string(),
            }),
        )
            .into_response();
    }

    if req.validate().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SendOtpResponse {
                success: false,
                token: None,
                message: "Invalid email format".to_string(),
            }),
        )
            .into_response();
    }

    match state.otp_service.send_otp(email).await {
        Ok(token) => (
            StatusCode::OK,
            Json(SendOtpResponse {
                success: true,
                token: Some(token),
                message: "OTP sent successfully".to_string(),
            }),
        )
            .into_response(),
        Err(AppError::InvalidRecipient) => (
            StatusCode::BAD_REQUEST,
            Json(SendOtpResponse {
                success: false,
                token: None,
                message: "Invalid email format".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("send_otp error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SendOtpResponse {
                    success: false,
                    token: None,
                    message: "Failed to send OTP".to_string(),
                }),
            )
                .into_response()
        }
    }
}

// 2. Verify OTP
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Response {
    verify_otp_inner(state, req)
}

pub async fn verify_otp_query(
    State(state): State<AppState>,
    Query(req): Query<VerifyOtpRequest>,
) -> Response {
    verify_otp_inner(state, req)
}

fn verify_otp_inner(state: AppState, req: VerifyOtpRequest) -> Response {
    match state.otp_service.verify_otp(&req.token, &req.otp) {
        Ok(()) => (
            StatusCode::OK,
            Json(VerifyOtpResponse {
                success: true,
                message: "OTP verified".to_string(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(VerifyOtpResponse {
                success: false,
                message: e.to_string(),
            }),
        )
            .into_response(),
    }
}
