use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use maintabit_core::models::feedback::Feedback;
use maintabit_desk::feedback::SubmitFeedback;
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, extractors::RequireAdmin, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub complaint_id: Option<String>,
    pub feedback: Option<String>,
    pub resolution: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    state
        .feedback
        .submit(SubmitFeedback {
            complaint_id: req.complaint_id,
            feedback: req.feedback,
            resolution: req.resolution,
            rating: req.rating,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Feedback submitted successfully",
        }),
    ))
}

/// Feedback left for one complaint, oldest first.
pub async fn list_feedback(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(complaint_id): Path<String>,
) -> ApiResult<Json<Vec<Feedback>>> {
    let items = state.feedback.list_for_complaint(&complaint_id).await?;
    Ok(Json(items))
}
