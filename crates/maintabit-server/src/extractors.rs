use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use maintabit_auth::{AuthError, SessionClaims};
use maintabit_core::MaintabitError;

use crate::{error::ApiError, state::AppState};

/// Extractor for requests carrying a valid session token
pub struct AuthenticatedUser {
    pub claims: SessionClaims,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

        let claims = state.auth.validate_token(token.trim()).map_err(|e| {
            tracing::warn!(error = %e, "Session token rejected");
            ApiError::from(e)
        })?;

        Ok(AuthenticatedUser { claims })
    }
}

/// Extractor that additionally requires the admin role
pub struct RequireAdmin {
    pub claims: SessionClaims,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser { claims } =
            AuthenticatedUser::from_request_parts(parts, state).await?;

        if !claims.is_admin() {
            tracing::warn!(sub = %claims.sub, "Admin route refused");
            return Err(MaintabitError::from(AuthError::AdminRequired).into());
        }

        Ok(RequireAdmin { claims })
    }
}
