use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use maintabit_desk::contact::SubmitContact;
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, extractors::AuthenticatedUser, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Signed-in senders are recorded by account ID unless the form names
/// one explicitly.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    user: Option<AuthenticatedUser>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    let user_id = req.user_id.or_else(|| user.map(|u| u.claims.sub));

    state
        .contact
        .submit(SubmitContact {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
            user_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Thank you for your message! We'll get back to you within 24 hours.",
        }),
    ))
}
