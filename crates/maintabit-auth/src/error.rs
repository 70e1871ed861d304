//! Authentication error types.

use maintabit_core::error::MaintabitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid password")]
    InvalidCredentials,

    #[error("{role} not found")]
    AccountNotFound { role: &'static str, email: String },

    #[error("invalid or expired OTP")]
    InvalidOtp,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("admin privileges required")]
    AdminRequired,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for MaintabitError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AccountNotFound { role, email } => MaintabitError::NotFound {
                entity: role.into(),
                id: email,
            },
            AuthError::InvalidCredentials
            | AuthError::InvalidOtp
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => MaintabitError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::AdminRequired => MaintabitError::AuthorizationDenied {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => MaintabitError::Crypto(msg),
        }
    }
}
