use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use maintabit_core::models::account::{CreateAdmin, CreateStudent};
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, extractors::RequireAdmin, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StudentSignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "code")]
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub role: String,
    pub expires_in: u64,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn signup_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StudentSignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    state
        .auth
        .signup_student(CreateStudent {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Student created successfully",
        }),
    ))
}

/// First login step: the code goes out by email only.
pub async fn login_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = payload?;
    state
        .auth
        .request_student_login(&req.email, &req.password, Utc::now())
        .await?;

    Ok(Json(MessageResponse {
        message: "OTP sent",
    }))
}

pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(req) = payload?;
    let session = state.auth.verify_otp(&req.email, &req.otp, Utc::now()).await?;

    Ok(Json(TokenResponse {
        token: session.token,
        role: session.role.to_string(),
        expires_in: session.expires_in,
    }))
}

/// Only an existing administrator may create another.
pub async fn signup_admin(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    let created = state
        .auth
        .signup_admin(CreateAdmin {
            email: req.email,
            password: req.password,
        })
        .await?;
    tracing::info!(admin_id = %created.id, created_by = %admin.claims.sub, "Admin account created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Admin created successfully",
        }),
    ))
}

pub async fn login_admin(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(req) = payload?;
    let session = state.auth.admin_login(&req.email, &req.password, Utc::now()).await?;

    Ok(Json(TokenResponse {
        token: session.token,
        role: session.role.to_string(),
        expires_in: session.expires_in,
    }))
}
