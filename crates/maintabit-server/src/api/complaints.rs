use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use maintabit_core::models::complaint::Complaint;
use maintabit_core::repository::{PaginatedResult, Pagination};
use maintabit_desk::attachment::Attachment;
use maintabit_desk::SubmitComplaint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extractors::RequireAdmin,
    state::AppState,
};

/// Upper bound on `limit` for the complaint listing.
const MAX_PAGE_SIZE: u64 = 200;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub message: String,
    pub tracking_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Complaint not found".into()))
}

/// Read the complaint form. Text fields accept both camelCase and
/// snake_case names; the attachment is the `file` part.
async fn read_form(mut multipart: Multipart) -> ApiResult<SubmitComplaint> {
    let mut form = SubmitComplaint::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;
            if !file_name.is_empty() && !data.is_empty() {
                form.attachment = Some(Attachment {
                    file_name,
                    content_type,
                    data,
                });
            }
            continue;
        }

        let value = field.text().await?;
        let slot = match name.as_str() {
            "email" => &mut form.email,
            "department" => &mut form.department,
            "category" => &mut form.category,
            "subCategory" | "sub_category" => &mut form.sub_category,
            "subOther" | "sub_other" => &mut form.sub_other,
            "description" => &mut form.description,
            "priority" => &mut form.priority,
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
                continue;
            }
        };
        *slot = Some(value);
    }

    Ok(form)
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn submit_complaint(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let form = read_form(multipart).await?;
    let outcome = state.desk.submit(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: outcome.message,
            tracking_id: outcome.complaint.tracking_id,
        }),
    ))
}

pub async fn list_complaints(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<PaginatedResult<Complaint>>> {
    let Query(page) = query?;
    let defaults = Pagination::default();
    let pagination = Pagination {
        offset: page.offset.unwrap_or(defaults.offset),
        limit: page.limit.unwrap_or(defaults.limit).clamp(1, MAX_PAGE_SIZE),
    };

    Ok(Json(state.desk.list_all(pagination).await?))
}

pub async fn complaints_by_email(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Complaint>>> {
    let Query(q) = query?;
    Ok(Json(state.desk.list_by_email(q.email.as_deref()).await?))
}

pub async fn get_complaint_by_tracking_id(
    State(state): State<Arc<AppState>>,
    Path(tracking_id): Path<String>,
) -> ApiResult<Json<Complaint>> {
    Ok(Json(state.desk.get_by_tracking_id(&tracking_id).await?))
}

pub async fn get_complaint_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Complaint>> {
    let id = parse_id(&id)?;
    Ok(Json(state.desk.get_by_id(id).await?))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Path(id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> ApiResult<Json<Complaint>> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    let complaint = state
        .desk
        .update_status(id, req.status.as_deref(), Utc::now())
        .await?;
    tracing::info!(complaint_id = %complaint.id, admin = %admin.claims.sub, "Status changed by admin");

    Ok(Json(complaint))
}
