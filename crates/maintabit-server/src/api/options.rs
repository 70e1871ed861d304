use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use maintabit_core::models::option::{DirectoryOption, OptionFilter, OptionKind, UpdateOption};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extractors::RequireAdmin,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Option not found".into()))
}

/// Public: the submission form is populated from this list.
pub async fn list_options(
    State(state): State<Arc<AppState>>,
    query: Result<Query<OptionFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<DirectoryOption>>> {
    let Query(filter) = query?;
    Ok(Json(state.options.list(filter).await?))
}

pub async fn create_option(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    payload: Result<Json<OptionKind>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DirectoryOption>)> {
    let Json(kind) = payload?;
    let option = state.options.create(kind).await?;
    Ok((StatusCode::CREATED, Json(option)))
}

pub async fn update_option(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOption>, JsonRejection>,
) -> ApiResult<Json<DirectoryOption>> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    Ok(Json(state.options.update(id, patch).await?))
}

pub async fn delete_option(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state.options.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Option deleted successfully",
    }))
}
