use axum::{
    extract::multipart::MultipartError,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use maintabit_core::MaintabitError;
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Human-readable name of a stored entity.
fn entity_label(entity: &str) -> String {
    let name = match entity {
        "dynamic_option" => "option",
        "contact_message" => "message",
        other => other,
    };
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => "Record".into(),
    }
}

impl From<MaintabitError> for ApiError {
    fn from(err: MaintabitError) -> Self {
        match err {
            MaintabitError::Validation { message } => ApiError::BadRequest(message),
            MaintabitError::AuthenticationFailed { reason } => ApiError::Unauthorized(reason),
            MaintabitError::AuthorizationDenied { reason } => ApiError::Forbidden(reason),
            MaintabitError::NotFound { entity, .. } => {
                ApiError::NotFound(format!("{} not found", entity_label(&entity)))
            }
            MaintabitError::AlreadyExists { entity } => match entity.as_str() {
                "student" | "admin" => ApiError::Conflict("Email already in use".into()),
                other => ApiError::Conflict(format!("{} already exists", entity_label(other))),
            },
            MaintabitError::Database(msg)
            | MaintabitError::Crypto(msg)
            | MaintabitError::Notification(msg)
            | MaintabitError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
