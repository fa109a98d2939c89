//! Task CRUD routes. One handler set serves both /apiv1 and /apiv2; the
//! per-version creation message arrives through [`VersionedApi`] state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::rest::extract::ValidJson;
use crate::rest::VersionedApi;
use crate::store::{Task, TaskDraft};

pub async fn get_task(
    State(api): State<VersionedApi>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, ApiError> {
    match api.ctx.store.find(id).await {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::TaskNotFound(id)),
    }
}

pub async fn create_task(
    State(api): State<VersionedApi>,
    ValidJson(draft): ValidJson<TaskDraft>,
) -> (StatusCode, Json<Value>) {
    let task = api.ctx.store.insert(draft).await;
    info!(id = task.id, title = %task.title, "task created");
    (
        StatusCode::CREATED,
        Json(json!({ "message": api.created_message, "task": task })),
    )
}

pub async fn update_task(
    State(api): State<VersionedApi>,
    Path(id): Path<u64>,
    ValidJson(draft): ValidJson<TaskDraft>,
) -> Result<StatusCode, ApiError> {
    match api.ctx.store.update(id, draft).await {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::TaskNotFound(id)),
    }
}

pub async fn delete_task(
    State(api): State<VersionedApi>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if api.ctx.store.delete(id).await {
        info!(id, "task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::TaskNotFound(id))
    }
}
